//! Stat projection
//!
//! Flattens weapon and module records into ordered table rows. Stat and
//! attack-type identifiers are replaced with their display names, and an
//! identifier missing from the lookup becomes `Unknown Stat (<id>)` rather
//! than an error, so a stale stat cache still produces a full report.

use crate::catalog::{display_value, Module, StatNameMap, Weapon};
use std::fmt;

// ============================================================================
// Level windows
// ============================================================================

/// Inclusive range of weapon levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelWindow {
    pub start: u32,
    pub end: u32,
}

impl LevelWindow {
    /// Every level a weapon can reach
    pub const FULL: LevelWindow = LevelWindow::new(1, 160);

    /// Windows offered for on-screen display
    pub const PRESETS: [LevelWindow; 5] = [
        LevelWindow::new(1, 30),
        LevelWindow::new(31, 60),
        LevelWindow::new(61, 90),
        LevelWindow::new(91, 120),
        LevelWindow::new(121, 160),
    ];

    /// Preset selected when the operator just confirms
    pub const DEFAULT: LevelWindow = LevelWindow::new(91, 120);

    pub const fn new(start: u32, end: u32) -> Self {
        LevelWindow { start, end }
    }

    pub fn contains(&self, level: u32) -> bool {
        (self.start..=self.end).contains(&level)
    }
}

impl fmt::Display for LevelWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

// ============================================================================
// Rows
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseStatRow {
    pub name: String,
    pub value: String,
}

impl BaseStatRow {
    pub fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.value.clone()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirearmAttackRow {
    pub level: u32,
    pub attack_type: String,
    pub value: String,
}

impl FirearmAttackRow {
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.level.to_string(),
            self.attack_type.clone(),
            self.value.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleStatRow {
    pub level: u32,
    pub capacity: String,
    pub value: String,
}

impl ModuleStatRow {
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.level.to_string(),
            self.capacity.clone(),
            self.value.clone(),
        ]
    }
}

// ============================================================================
// Projections
// ============================================================================

/// One row per base stat, in source order
pub fn project_weapon_base_stats(weapon: &Weapon, stat_names: &StatNameMap) -> Vec<BaseStatRow> {
    weapon
        .base_stat
        .iter()
        .map(|stat| BaseStatRow {
            name: stat_names.resolve(&stat.stat_id),
            value: display_value(&stat.stat_value),
        })
        .collect()
}

/// One row per (level, attack type) inside `window`
///
/// Levels keep their source order, and so do the attack types within a level.
pub fn project_weapon_firearm_attack(
    weapon: &Weapon,
    stat_names: &StatNameMap,
    window: LevelWindow,
) -> Vec<FirearmAttackRow> {
    weapon
        .firearm_atk
        .iter()
        .filter(|entry| window.contains(entry.level))
        .flat_map(|entry| {
            entry.firearm.iter().map(move |attack| FirearmAttackRow {
                level: entry.level,
                attack_type: stat_names.resolve(&attack.firearm_atk_type),
                value: display_value(&attack.firearm_atk_value),
            })
        })
        .collect()
}

/// One row per module level
pub fn project_module_stats(module: &Module) -> Vec<ModuleStatRow> {
    module
        .module_stat
        .iter()
        .map(|stat| ModuleStatRow {
            level: stat.level,
            capacity: display_value(&stat.module_capacity),
            value: stat.value.clone(),
        })
        .collect()
}
