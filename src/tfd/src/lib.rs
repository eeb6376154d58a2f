//! # tfd
//!
//! The First Descendant catalog library - cached datasets, search, and stat
//! reports.
//!
//! This library provides functionality to:
//! - Load the weapon, stat and module datasets, from a local cache when
//!   present or from the static metadata endpoint otherwise
//! - Search records by name and narrow matches to a single record
//! - Project weapon and module stats into ordered table rows
//! - Build on-screen tables and CSV exports from those rows
//!
//! ## Example
//!
//! ```no_run
//! use tfd::{CatalogConfig, DatasetLoader, Fetcher, FetchError, ItemReport, LevelWindow};
//!
//! struct Offline;
//!
//! impl Fetcher for Offline {
//!     fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
//!         Err(FetchError::Network { url: url.to_string(), reason: "offline".into() })
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CatalogConfig::new("/tmp/tfd-cache");
//! let catalog = DatasetLoader::new(&config, Offline).load_all()?;
//!
//! let matches = tfd::search(&catalog.weapons, "thunder")?;
//! if let tfd::Resolution::Selected(weapon) = tfd::resolve(matches, |_| Some(0)) {
//!     let report = ItemReport::weapon(weapon, &catalog.stat_names);
//!     let display = tfd::build_display_report(&report, LevelWindow::DEFAULT);
//!     println!("{}", display.tables[1].title);
//!
//!     tfd::export_csv("/tmp".as_ref(), "thunder_cage", &tfd::build_csv_rows(&report))?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod export;
pub mod fetch;
pub mod loader;
pub mod projection;
pub mod report;
pub mod search;
pub mod store;

#[doc(inline)]
pub use catalog::{
    display_value, BaseStat, Dataset, FirearmAttack, FirearmLevel, Module, ModuleStat,
    StatNameMap, StatRecord, Weapon,
};
#[doc(inline)]
pub use config::{CatalogConfig, DEFAULT_BASE_URL};
#[doc(inline)]
pub use export::{csv_path, export_csv, write_rows, ExportError};
#[doc(inline)]
pub use fetch::{FetchError, Fetcher};
#[doc(inline)]
pub use loader::{Catalog, DatasetLoader, LoadError};
#[doc(inline)]
pub use projection::{
    project_module_stats, project_weapon_base_stats, project_weapon_firearm_attack, BaseStatRow,
    FirearmAttackRow, LevelWindow, ModuleStatRow,
};
#[doc(inline)]
pub use report::{build_csv_rows, build_display_report, DisplayReport, ItemReport, Table};
#[doc(inline)]
pub use search::{resolve, search, search_by, try_resolve, Named, Resolution, SearchError};
#[doc(inline)]
pub use store::{LocalStore, StoreError};
