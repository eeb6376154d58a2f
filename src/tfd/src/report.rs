//! Report building
//!
//! Turns projected rows into the two output shapes the tool produces: titled
//! tables for the terminal and a flat row list for CSV export.
//!
//! The two shapes intentionally differ. On screen, module tables get a blank
//! row after every stat row and weapon attack tables follow the chosen level
//! window. In CSV, module rows are not padded and weapon attack rows always
//! span the full level range.

use crate::catalog::{Module, StatNameMap, Weapon};
use crate::projection::{
    project_module_stats, project_weapon_base_stats, project_weapon_firearm_attack, LevelWindow,
};
use crate::search::Named;

/// A record paired with what is needed to report on it
#[derive(Debug, Clone, Copy)]
pub enum ItemReport<'a> {
    Weapon {
        weapon: &'a Weapon,
        stat_names: &'a StatNameMap,
    },
    Module(&'a Module),
}

impl<'a> ItemReport<'a> {
    pub fn weapon(weapon: &'a Weapon, stat_names: &'a StatNameMap) -> Self {
        ItemReport::Weapon { weapon, stat_names }
    }

    pub fn module(module: &'a Module) -> Self {
        ItemReport::Module(module)
    }

    pub fn name(&self) -> &str {
        match self {
            ItemReport::Weapon { weapon, .. } => weapon.name(),
            ItemReport::Module(module) => module.name(),
        }
    }
}

/// One titled table of string cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new(title: String, headers: &[&str]) -> Self {
        Table {
            title,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn push_pair(&mut self, key: &str, value: &str) {
        self.rows.push(vec![key.to_string(), value.to_string()]);
    }

    fn push_blank(&mut self) {
        self.rows.push(vec![String::new(); self.headers.len()]);
    }
}

/// Tables for on-screen display, laid out side by side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayReport {
    pub tables: Vec<Table>,
}

/// Identity fields shown before a weapon's base stats
fn weapon_identity(weapon: &Weapon) -> [(&'static str, &str); 4] {
    [
        ("Weapon ID", weapon.weapon_id.as_str()),
        ("Weapon Type", weapon.weapon_type.as_str()),
        ("Weapon Tier", weapon.weapon_tier.as_str()),
        ("Rounds Type", weapon.weapon_rounds_type.as_str()),
    ]
}

/// Build the on-screen view of an item
///
/// `window` only applies to weapons.
pub fn build_display_report(report: &ItemReport<'_>, window: LevelWindow) -> DisplayReport {
    match *report {
        ItemReport::Weapon { weapon, stat_names } => {
            let mut base = Table::new(
                format!("{} - Base Stats", weapon.weapon_name),
                &["Attribute", "Value"],
            );
            for (key, value) in weapon_identity(weapon) {
                base.push_pair(key, value);
            }
            for row in project_weapon_base_stats(weapon, stat_names) {
                base.push(row.cells());
            }

            let mut attack = Table::new(
                format!("{} - Firearm Attack ({})", weapon.weapon_name, window),
                &["Level", "Type", "Value"],
            );
            for row in project_weapon_firearm_attack(weapon, stat_names, window) {
                attack.push(row.cells());
            }

            DisplayReport {
                tables: vec![base, attack],
            }
        }
        ItemReport::Module(module) => {
            let mut stats = Table::new(
                format!("{} - Stats", module.module_name),
                &["Level", "Capacity", "Value"],
            );
            for row in project_module_stats(module) {
                stats.push(row.cells());
                stats.push_blank();
            }

            DisplayReport {
                tables: vec![stats],
            }
        }
    }
}

fn cells(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build the flat row list written to CSV
///
/// Empty rows separate sections. Weapon attack rows always cover
/// [`LevelWindow::FULL`], whatever window was last displayed.
pub fn build_csv_rows(report: &ItemReport<'_>) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    match *report {
        ItemReport::Weapon { weapon, stat_names } => {
            for (key, value) in weapon_identity(weapon) {
                rows.push(cells(&[key, value]));
            }
            rows.push(Vec::new());

            rows.push(cells(&["Base Stats"]));
            rows.extend(
                project_weapon_base_stats(weapon, stat_names)
                    .iter()
                    .map(|row| row.cells()),
            );
            rows.push(Vec::new());

            rows.push(vec![format!("Firearm Attack ({})", LevelWindow::FULL)]);
            rows.push(cells(&["Level", "Type", "Value"]));
            rows.extend(
                project_weapon_firearm_attack(weapon, stat_names, LevelWindow::FULL)
                    .iter()
                    .map(|row| row.cells()),
            );
        }
        ItemReport::Module(module) => {
            rows.push(cells(&["Module Name", &module.module_name]));
            rows.push(Vec::new());
            rows.push(cells(&["Level", "Capacity", "Value"]));
            rows.extend(project_module_stats(module).iter().map(|row| row.cells()));
        }
    }

    rows
}
