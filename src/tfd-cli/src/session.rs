//! Interactive menu session
//!
//! Holds the loaded catalog for the lifetime of the process and walks the
//! operator through search, display and export. Every recoverable problem
//! (bad input, no matches, failed refresh, failed export) is reported through
//! the prompt and the session returns to the main menu; only prompt I/O
//! failures propagate to the caller.
//!
//! The screen is cleared when an action starts, not when the menu is drawn,
//! so the outcome of the previous action stays visible above the menu.

use crate::prompt::Prompt;
use crate::render::render_report;
use anyhow::Result;
use tfd::{
    build_csv_rows, build_display_report, export_csv, Catalog, DatasetLoader, Fetcher,
    ItemReport, LevelWindow, Module, Named, Resolution, SearchError, StatNameMap, Weapon,
};

const MAIN_MENU: [&str; 4] = ["Search Weapons", "Search Modules", "Refresh Cache", "Exit"];
const NEXT_ACTIONS: [&str; 2] = ["Return to main menu", "Output to CSV"];
const RETURN_PROMPT: &str = "Press enter to return to main menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    SearchWeapons,
    SearchModules,
    RefreshCache,
    Exit,
}

impl MenuChoice {
    fn from_index(index: usize) -> Self {
        match index {
            0 => MenuChoice::SearchWeapons,
            1 => MenuChoice::SearchModules,
            2 => MenuChoice::RefreshCache,
            _ => MenuChoice::Exit,
        }
    }
}

/// Which records a search flow operates on
#[derive(Debug, Clone, Copy)]
enum ItemKind {
    Weapon,
    Module,
}

impl ItemKind {
    fn singular(self) -> &'static str {
        match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Module => "module",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            ItemKind::Weapon => "weapons",
            ItemKind::Module => "modules",
        }
    }
}

pub struct Session<'a, F, P> {
    loader: DatasetLoader<'a, F>,
    catalog: Catalog,
    prompt: P,
}

impl<'a, F: Fetcher, P: Prompt> Session<'a, F, P> {
    /// Load the catalog (or re-download it when `refresh` is set) and start a session
    pub fn start(loader: DatasetLoader<'a, F>, mut prompt: P, refresh: bool) -> Result<Self> {
        prompt.message("Loading data...")?;
        let catalog = if refresh {
            loader.refresh_all()?
        } else {
            loader.load_all()?
        };
        report_loaded(&mut prompt, &catalog)?;

        Ok(Session {
            loader,
            catalog,
            prompt,
        })
    }

    /// Run the main menu until the operator exits
    pub fn run(&mut self) -> Result<()> {
        loop {
            let choice = self
                .prompt
                .select("What would you like to do?", &MAIN_MENU, None)?
                .map(MenuChoice::from_index)
                .unwrap_or(MenuChoice::Exit);

            match choice {
                MenuChoice::SearchWeapons => self.search_weapons()?,
                MenuChoice::SearchModules => self.search_modules()?,
                MenuChoice::RefreshCache => self.refresh_cache()?,
                MenuChoice::Exit => {
                    self.prompt.message("Exiting.")?;
                    return Ok(());
                }
            }
        }
    }

    /// Re-download every dataset, keeping the current catalog if that fails
    pub fn refresh_cache(&mut self) -> Result<()> {
        self.prompt.clear()?;
        self.prompt.message("Refreshing cache...")?;
        match self.loader.refresh_all() {
            Ok(catalog) => {
                self.catalog = catalog;
                self.prompt.message("Cache refreshed.\n")?;
                report_loaded(&mut self.prompt, &self.catalog)?;
            }
            Err(err) => {
                tracing::warn!(error = %err, "refresh failed");
                self.prompt.message(&format!("Failed to refresh cache: {}", err))?;
                self.prompt.message("Continuing with previously loaded data.\n")?;
            }
        }

        self.prompt.pause(RETURN_PROMPT)
    }

    pub fn search_weapons(&mut self) -> Result<()> {
        self.prompt.clear()?;
        let prompt = &mut self.prompt;
        let catalog = &self.catalog;

        let names = catalog.weapon_names();
        let Some(weapon) = find_item(prompt, ItemKind::Weapon, &catalog.weapons, &names)? else {
            return Ok(());
        };
        show_weapon(prompt, weapon, &catalog.stat_names)
    }

    pub fn search_modules(&mut self) -> Result<()> {
        self.prompt.clear()?;
        let prompt = &mut self.prompt;
        let catalog = &self.catalog;

        let names = catalog.module_names();
        let Some(module) = find_item(prompt, ItemKind::Module, &catalog.modules, &names)? else {
            return Ok(());
        };
        show_module(prompt, module)
    }
}

fn report_loaded<P: Prompt>(prompt: &mut P, catalog: &Catalog) -> Result<()> {
    prompt.message(&format!(
        "Loaded {} weapons and {} modules.",
        catalog.weapons.len(),
        catalog.modules.len()
    ))
}

/// Ask for a search term and narrow the matches to one record
///
/// A blank term is re-asked; `exit` or a cancelled prompt returns `None`.
fn find_item<'r, P: Prompt, T: Named>(
    prompt: &mut P,
    kind: ItemKind,
    records: &'r [T],
    names: &[String],
) -> Result<Option<&'r T>> {
    let message = format!(
        "Enter the {} name to search for (or type 'exit' to quit):",
        kind.singular()
    );

    let (term, matches) = loop {
        let term = match prompt.autocomplete(&message, names)? {
            Some(term) if !term.trim().eq_ignore_ascii_case("exit") => term,
            _ => {
                prompt.message("Exiting.")?;
                return Ok(None);
            }
        };

        match tfd::search(records, &term) {
            Ok(matches) => break (term, matches),
            Err(SearchError::EmptySearchTerm) => {
                prompt.message("Search term cannot be empty. Please try again.")?;
            }
        }
    };
    tracing::debug!(term = %term, matches = matches.len(), "search");

    let choose_message = format!("Multiple {} found. Please select one:", kind.plural());
    let resolution = tfd::try_resolve(matches, |candidates| {
        prompt.select(&choose_message, candidates, None)
    })?;

    match resolution {
        Resolution::Selected(record) => Ok(Some(record)),
        Resolution::NoResults => {
            prompt.message(&format!("No {} found matching '{}'.", kind.plural(), term))?;
            Ok(None)
        }
        Resolution::Aborted => Ok(None),
    }
}

fn show_weapon<P: Prompt>(prompt: &mut P, weapon: &Weapon, stat_names: &StatNameMap) -> Result<()> {
    let labels: Vec<String> = LevelWindow::PRESETS.iter().map(|w| w.to_string()).collect();
    let mut choices: Vec<&str> = labels.iter().map(String::as_str).collect();
    choices.push("Back");

    let default = LevelWindow::PRESETS
        .iter()
        .position(|w| *w == LevelWindow::DEFAULT);

    let window = match prompt.select(
        "Choose the range of firearm attack levels to display:",
        &choices,
        default,
    )? {
        Some(index) if index < LevelWindow::PRESETS.len() => LevelWindow::PRESETS[index],
        _ => return Ok(()),
    };

    let report = ItemReport::weapon(weapon, stat_names);
    let rendered = render_report(&build_display_report(&report, window));
    prompt.message(rendered.trim_end())?;

    offer_export(prompt, &report)
}

fn show_module<P: Prompt>(prompt: &mut P, module: &Module) -> Result<()> {
    let report = ItemReport::module(module);
    let rendered = render_report(&build_display_report(&report, LevelWindow::FULL));
    prompt.message(rendered.trim_end())?;

    offer_export(prompt, &report)
}

fn offer_export<P: Prompt>(prompt: &mut P, report: &ItemReport<'_>) -> Result<()> {
    let next = prompt.select("What would you like to do next?", &NEXT_ACTIONS, Some(0))?;
    if next == Some(1) {
        export_report(prompt, report)?;
    }
    Ok(())
}

/// Ask where to write the CSV and write it
fn export_report<P: Prompt>(prompt: &mut P, report: &ItemReport<'_>) -> Result<()> {
    let Some(dir) = prompt.directory("Select the output directory:")? else {
        return prompt.message("Invalid directory. Returning to main menu.");
    };

    let name = match prompt.text("Enter the CSV file name (without extension):")? {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => return prompt.message("Invalid file name. Returning to main menu."),
    };

    match export_csv(&dir, &name, &build_csv_rows(report)) {
        Ok(path) => {
            prompt.message(&format!("Data successfully exported to {}.\n", path.display()))?;
        }
        Err(err) => {
            tracing::warn!(error = %err, item = report.name(), "export failed");
            prompt.message(&format!("Failed to export data to CSV: {}", err))?;
        }
    }

    prompt.pause(RETURN_PROMPT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{TerminalPrompt, CLEAR_SCREEN};
    use std::cell::Cell;
    use std::fs;
    use std::io::Cursor;
    use tfd::{CatalogConfig, Dataset, FetchError};

    const WEAPONS_JSON: &str = r#"[
        {"weapon_id": "1", "weapon_name": "Thunder Cage", "weapon_type": "Shotgun",
         "weapon_tier": "Ultimate", "weapon_rounds_type": "Special Rounds",
         "base_stat": [{"stat_id": "501", "stat_value": 10}],
         "firearm_atk": [
            {"level": 1, "firearm": [{"firearm_atk_type": "105000026", "firearm_atk_value": 100}]},
            {"level": 100, "firearm": [{"firearm_atk_type": "105000026", "firearm_atk_value": 1000}]},
            {"level": 121, "firearm": [{"firearm_atk_type": "105000026", "firearm_atk_value": 1210}]}
         ]},
        {"weapon_id": "2", "weapon_name": "Thunderbolt", "weapon_type": "Sniper Rifle",
         "weapon_tier": "Rare", "weapon_rounds_type": "High-Power Rounds",
         "base_stat": [], "firearm_atk": []}
    ]"#;
    const STATS_JSON: &str = r#"[{"stat_id": "105000026", "stat_name": "Firearm ATK"}]"#;
    const MODULES_JSON: &str = r#"[
        {"module_id": "9", "module_name": "Ironclad",
         "module_stat": [{"level": 0, "module_capacity": 6, "value": "DEF +10%"}]}
    ]"#;

    struct StaticFetcher {
        calls: Cell<usize>,
        online: bool,
    }

    impl StaticFetcher {
        fn online() -> Self {
            StaticFetcher {
                calls: Cell::new(0),
                online: true,
            }
        }

        fn offline() -> Self {
            StaticFetcher {
                calls: Cell::new(0),
                online: false,
            }
        }
    }

    impl Fetcher for StaticFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.calls.set(self.calls.get() + 1);
            if !self.online {
                return Err(FetchError::Network {
                    url: url.to_string(),
                    reason: "offline".to_string(),
                });
            }
            let body = match url.rsplit('/').next() {
                Some("weapon.json") => WEAPONS_JSON,
                Some("stat.json") => STATS_JSON,
                _ => MODULES_JSON,
            };
            Ok(body.as_bytes().to_vec())
        }
    }

    type ScriptedPrompt<'o> = TerminalPrompt<Cursor<Vec<u8>>, &'o mut Vec<u8>>;

    fn scripted<'o>(lines: &[&str], out: &'o mut Vec<u8>) -> ScriptedPrompt<'o> {
        let mut input = lines.join("\n");
        input.push('\n');
        TerminalPrompt::new(Cursor::new(input.into_bytes()), out)
    }

    /// Run a whole session against scripted input and return everything shown
    fn run_script<F: Fetcher>(config: &CatalogConfig, fetcher: F, lines: &[&str]) -> String {
        let mut out = Vec::new();
        let loader = DatasetLoader::new(config, fetcher);
        let mut session = Session::start(loader, scripted(lines, &mut out), false).unwrap();
        session.run().unwrap();
        drop(session);
        String::from_utf8(out).unwrap()
    }

    fn seed_cache(config: &CatalogConfig) {
        let store = tfd::LocalStore::new(config);
        store.write_raw(Dataset::Weapons, WEAPONS_JSON.as_bytes()).unwrap();
        store.write_raw(Dataset::Stats, STATS_JSON.as_bytes()).unwrap();
        store.write_raw(Dataset::Modules, MODULES_JSON.as_bytes()).unwrap();
    }

    const WEAPON_SEARCH: &str = "Enter the weapon name to search for (or type 'exit' to quit):";

    #[test]
    fn test_start_uses_cache() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path());
        seed_cache(&config);

        let fetcher = StaticFetcher::offline();
        let loader = DatasetLoader::new(&config, &fetcher);
        let mut out = Vec::new();
        let session = Session::start(loader, scripted(&[], &mut out), false).unwrap();

        assert_eq!(session.catalog.weapons.len(), 2);
        assert_eq!(fetcher.calls.get(), 0);
        drop(session);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Loading data...\nLoaded 2 weapons and 1 modules.\n"
        );
    }

    #[test]
    fn test_start_fails_offline_without_cache() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path());

        let fetcher = StaticFetcher::offline();
        let loader = DatasetLoader::new(&config, &fetcher);
        let mut out = Vec::new();
        assert!(Session::start(loader, scripted(&[], &mut out), false).is_err());
    }

    #[test]
    fn test_exit_from_menu() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path());
        seed_cache(&config);

        let out = run_script(&config, StaticFetcher::offline(), &["4"]);
        assert!(out.ends_with("Exiting.\n"));
        assert!(!out.contains(WEAPON_SEARCH));
    }

    #[test]
    fn test_end_of_input_exits() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path());
        seed_cache(&config);

        // Input ends at the search prompt, then again at the main menu
        let out = run_script(&config, StaticFetcher::offline(), &["1"]);
        assert_eq!(out.matches(WEAPON_SEARCH).count(), 1);
        assert_eq!(out.matches("Exiting.").count(), 2);
    }

    #[test]
    fn test_weapon_search_disambiguate_and_export() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path().join("cache"));
        seed_cache(&config);
        let out_dir = temp_dir.path().join("out");
        fs::create_dir(&out_dir).unwrap();
        let out_dir_str = out_dir.display().to_string();
        let out_dir_str = out_dir_str.as_str();

        let script = [
            "1",              // Search Weapons
            "thunder",        // matches two weapons
            "1",              // Thunder Cage
            "1",              // window 1-30
            "2",              // Output to CSV
            out_dir_str,      // output directory
            "thunder_cage",   // file name
            "",               // press enter
            "4",              // Exit
        ];
        let out = run_script(&config, StaticFetcher::offline(), &script);

        assert!(out.contains("Multiple weapons found. Please select one:"));
        assert!(out.contains("Thunder Cage - Firearm Attack (1-30)"));
        let csv_path = out_dir.join("thunder_cage.csv");
        assert!(out.contains(&format!("Data successfully exported to {}.", csv_path.display())));

        let csv = fs::read_to_string(csv_path).unwrap();
        assert!(csv.starts_with("Weapon ID,1\nWeapon Type,Shotgun\n"));
        assert!(csv.contains("\n\nBase Stats\nUnknown Stat (501),10\n"));
        assert!(csv.contains("Firearm Attack (1-160)\nLevel,Type,Value\n"));
        // Exported rows span every level, not only the window shown on screen
        assert!(csv.ends_with("121,Firearm ATK,1210\n"));
    }

    #[test]
    fn test_module_search_single_match_export() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path().join("cache"));
        seed_cache(&config);
        let out_dir_str = temp_dir.path().display().to_string();

        let script = ["2", "IRON", "2", out_dir_str.as_str(), "ironclad", "", "4"];
        let out = run_script(&config, StaticFetcher::offline(), &script);

        assert!(out.contains("Ironclad - Stats"));
        assert!(!out.contains("Multiple modules found"));
        let csv = fs::read_to_string(temp_dir.path().join("ironclad.csv")).unwrap();
        assert_eq!(
            csv,
            "Module Name,Ironclad\n\nLevel,Capacity,Value\n0,6,DEF +10%\n"
        );
    }

    #[test]
    fn test_blank_term_asks_again() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path());
        seed_cache(&config);

        // blank, then a real name; default window; default next action; exit
        let script = ["1", "   ", "Thunderbolt", "", "", "4"];
        let out = run_script(&config, StaticFetcher::offline(), &script);

        assert_eq!(out.matches(WEAPON_SEARCH).count(), 2);
        assert_eq!(
            out.matches("Search term cannot be empty. Please try again.").count(),
            1
        );
        assert!(out.contains("Thunderbolt - Firearm Attack (91-120)"));
        assert_eq!(out.matches("What would you like to do?").count(), 2);
    }

    #[test]
    fn test_no_match_and_exit_are_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path());
        seed_cache(&config);

        let script = ["1", "zzz", "2", "zzz", "1", "EXIT", "4"];
        let out = run_script(&config, StaticFetcher::offline(), &script);

        assert!(out.contains("No weapons found matching 'zzz'.\n"));
        assert!(out.contains("No modules found matching 'zzz'.\n"));
        assert_eq!(out.matches("Exiting.").count(), 2);
    }

    #[test]
    fn test_outcome_survives_screen_clear() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path());
        seed_cache(&config);

        let mut out = Vec::new();
        let prompt = scripted(&["1", "zzz", "4"], &mut out).with_clear_screen(true);
        let loader = DatasetLoader::new(&config, StaticFetcher::offline());
        let mut session = Session::start(loader, prompt, false).unwrap();
        session.run().unwrap();
        drop(session);
        let out = String::from_utf8(out).unwrap();

        let cleared = out.rfind(CLEAR_SCREEN).unwrap();
        let reported = out.find("No weapons found matching 'zzz'.").unwrap();
        assert!(cleared < reported);
        // The next menu is drawn below the message without another clear
        assert!(out[reported..].contains("What would you like to do?"));
        assert_eq!(out.matches(CLEAR_SCREEN).count(), 1);
    }

    #[test]
    fn test_failed_refresh_keeps_catalog() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path());
        seed_cache(&config);

        let fetcher = StaticFetcher::offline();
        let loader = DatasetLoader::new(&config, &fetcher);
        let mut out = Vec::new();
        let mut session =
            Session::start(loader, scripted(&["3", "", "4"], &mut out), false).unwrap();
        session.run().unwrap();

        assert_eq!(fetcher.calls.get(), 1);
        assert_eq!(session.catalog.modules.len(), 1);
        drop(session);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Failed to refresh cache: "));
        assert!(out.contains("Continuing with previously loaded data."));
    }

    #[test]
    fn test_refresh_refetches_everything() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path());
        let store = tfd::LocalStore::new(&config);
        for dataset in Dataset::ALL {
            store.write_raw(dataset, b"[]").unwrap();
        }

        let fetcher = StaticFetcher::online();
        let loader = DatasetLoader::new(&config, &fetcher);
        let mut out = Vec::new();
        let mut session =
            Session::start(loader, scripted(&["3", "", "4"], &mut out), false).unwrap();
        assert!(session.catalog.weapons.is_empty());

        session.run().unwrap();

        assert_eq!(fetcher.calls.get(), 3);
        assert_eq!(session.catalog.weapons.len(), 2);
        assert_eq!(
            fs::read_to_string(config.cache_path(Dataset::Stats)).unwrap(),
            STATS_JSON
        );
        drop(session);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Cache refreshed.\n\nLoaded 2 weapons and 1 modules.\n"));
    }

    #[test]
    fn test_export_blank_directory_aborts() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path());
        seed_cache(&config);
        let module: Module = serde_json::from_str::<Vec<Module>>(MODULES_JSON)
            .unwrap()
            .remove(0);

        let mut out = Vec::new();
        let mut prompt = scripted(&[""], &mut out);
        export_report(&mut prompt, &ItemReport::module(&module)).unwrap();
        drop(prompt);

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Select the output directory: Invalid directory. Returning to main menu.\n"
        );
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_menu_choice_from_index() {
        assert_eq!(MenuChoice::from_index(0), MenuChoice::SearchWeapons);
        assert_eq!(MenuChoice::from_index(2), MenuChoice::RefreshCache);
        assert_eq!(MenuChoice::from_index(3), MenuChoice::Exit);
    }
}
