mod cli;
mod commands;
mod config;
mod network;
mod prompt;
mod render;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use network::HttpFetcher;
use prompt::TerminalPrompt;
use session::Session;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tfd::{CatalogConfig, DatasetLoader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    install_interrupt_handler()?;

    match cli.command {
        Some(Commands::Configure {
            set_cache_dir,
            set_base_url,
            show,
        }) => commands::configure::handle(set_cache_dir, set_base_url, show),

        Some(Commands::Refresh) => {
            let config = resolve_config(cli.cache_dir, cli.base_url)?;
            commands::refresh::handle(&config, HttpFetcher::default())
        }

        None => {
            let config = resolve_config(cli.cache_dir, cli.base_url)?;
            interactive(&config, cli.refresh, !cli.no_clear)
        }
    }
}

fn resolve_config(cache_dir: Option<PathBuf>, base_url: Option<String>) -> Result<CatalogConfig> {
    let config = Config::load()?.catalog_config(cache_dir, base_url)?;
    tracing::debug!(
        cache_dir = %config.cache_dir().display(),
        base_url = %config.base_url,
        "resolved catalog settings"
    );
    Ok(config)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Ctrl-C anywhere ends the process with `Exiting.`
fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        println!("\nExiting.");
        std::process::exit(0);
    })
    .context("Failed to install interrupt handler")
}

fn interactive(config: &CatalogConfig, refresh: bool, clear: bool) -> Result<()> {
    let fetcher = HttpFetcher::default();
    let loader = DatasetLoader::new(config, &fetcher);
    let prompt = TerminalPrompt::new(io::stdin().lock(), io::stdout())
        .with_clear_screen(clear && io::stdout().is_terminal());

    let mut session = Session::start(loader, prompt, refresh).context("Failed to load data")?;
    session.run()
}
