//! Line-based interactive prompts
//!
//! The session talks to the operator only through [`Prompt`], one blocking
//! question at a time. [`TerminalPrompt`] implements it over any line reader
//! and writer, so stdin/stdout in production and scripted input in tests.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Most suggestions listed for one `?` query
const MAX_SUGGESTIONS: usize = 20;

pub trait Prompt {
    /// Pick one of `choices`; `Ok(None)` when the operator cancels
    fn select(&mut self, message: &str, choices: &[&str], default: Option<usize>)
        -> Result<Option<usize>>;

    /// Free text entry with name suggestions drawn from `suggestions`
    fn autocomplete(&mut self, message: &str, suggestions: &[String]) -> Result<Option<String>>;

    /// Free text entry
    fn text(&mut self, message: &str) -> Result<Option<String>>;

    /// Path to an existing directory; `Ok(None)` when left blank or cancelled
    fn directory(&mut self, message: &str) -> Result<Option<PathBuf>>;

    /// Wait for the operator to press enter
    fn pause(&mut self, message: &str) -> Result<()>;

    /// Show a line of output to the operator
    fn message(&mut self, text: &str) -> Result<()>;

    /// Start a fresh screen, if the terminal supports it
    fn clear(&mut self) -> Result<()>;
}

/// ANSI erase-display and cursor-home
pub(crate) const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalPrompt {
            input,
            output,
            clear_screen: false,
        }
    }

    /// Emit the clear-screen sequence on [`Prompt::clear`]
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// Read one line without its terminator; `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{} ", message)?;
        self.output.flush()?;
        self.read_line()
    }

    fn print_suggestions(&mut self, partial: &str, suggestions: &[String]) -> Result<()> {
        let needle = partial.trim().to_lowercase();
        let matching: Vec<&String> = suggestions
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect();

        if matching.is_empty() {
            writeln!(self.output, "  No suggestions.")?;
            return Ok(());
        }

        for name in matching.iter().take(MAX_SUGGESTIONS) {
            writeln!(self.output, "  {}", name)?;
        }
        if matching.len() > MAX_SUGGESTIONS {
            writeln!(self.output, "  ... and {} more", matching.len() - MAX_SUGGESTIONS)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn select(
        &mut self,
        message: &str,
        choices: &[&str],
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        writeln!(self.output, "{}", message)?;
        for (i, choice) in choices.iter().enumerate() {
            let marker = if default == Some(i) { " (default)" } else { "" };
            writeln!(self.output, "  {}) {}{}", i + 1, choice, marker)?;
        }

        loop {
            let Some(answer) = self.ask(">")? else {
                return Ok(None);
            };
            let answer = answer.trim();

            if answer.is_empty() {
                if let Some(index) = default {
                    return Ok(Some(index));
                }
            } else if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            } else if let Ok(n) = answer.parse::<usize>() {
                if (1..=choices.len()).contains(&n) {
                    return Ok(Some(n - 1));
                }
            } else if let Some(index) = choices
                .iter()
                .position(|choice| choice.eq_ignore_ascii_case(answer))
            {
                return Ok(Some(index));
            }

            writeln!(
                self.output,
                "Please enter a number between 1 and {} (q to cancel).",
                choices.len()
            )?;
        }
    }

    fn autocomplete(&mut self, message: &str, suggestions: &[String]) -> Result<Option<String>> {
        writeln!(self.output, "{}", message)?;
        writeln!(self.output, "(end with '?' to list matching names)")?;

        loop {
            let Some(answer) = self.ask(">")? else {
                return Ok(None);
            };

            match answer.strip_suffix('?') {
                Some(partial) => self.print_suggestions(partial, suggestions)?,
                None => return Ok(Some(answer)),
            }
        }
    }

    fn text(&mut self, message: &str) -> Result<Option<String>> {
        self.ask(message)
    }

    fn directory(&mut self, message: &str) -> Result<Option<PathBuf>> {
        loop {
            let Some(answer) = self.ask(message)? else {
                return Ok(None);
            };
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(None);
            }

            let path = expand_home(answer);
            if path.is_dir() {
                return Ok(Some(path));
            }

            writeln!(self.output, "The directory '{}' is not valid.", answer)?;
        }
    }

    fn pause(&mut self, message: &str) -> Result<()> {
        self.ask(message)?;
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.clear_screen {
            write!(self.output, "{}", CLEAR_SCREEN)?;
            self.output.flush()?;
        }
        Ok(())
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with(['/', '\\']) {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest.trim_start_matches(['/', '\\']));
            }
        }
    }
    PathBuf::from(input)
}
