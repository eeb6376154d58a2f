//! Catalog record types
//!
//! Shapes of the three datasets served by the static metadata endpoint
//! (weapons, stat names, modules). Deserialization is best-effort: missing
//! keys fall back to defaults and identifier fields accept either strings or
//! numbers, so an upstream schema drift degrades the output instead of
//! failing the whole load.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// Datasets
// ============================================================================

/// One independently cached and refreshable dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Weapons,
    Stats,
    Modules,
}

impl Dataset {
    /// Load and refresh order
    pub const ALL: [Dataset; 3] = [Dataset::Weapons, Dataset::Stats, Dataset::Modules];

    /// File name used both for the cache file and the remote document
    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::Weapons => "weapon.json",
            Dataset::Stats => "stat.json",
            Dataset::Modules => "module.json",
        }
    }

    /// Human-readable label for log and error messages
    pub fn label(self) -> &'static str {
        match self {
            Dataset::Weapons => "weapons",
            Dataset::Stats => "stats",
            Dataset::Modules => "modules",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Weapons
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    #[serde(default, deserialize_with = "lenient_string")]
    pub weapon_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weapon_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weapon_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weapon_tier: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weapon_rounds_type: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub base_stat: Vec<BaseStat>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub firearm_atk: Vec<FirearmLevel>,
}

/// A single base stat entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseStat {
    #[serde(default, deserialize_with = "lenient_string")]
    pub stat_id: String,
    #[serde(default)]
    pub stat_value: Value,
}

/// Firearm attack values at one weapon level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirearmLevel {
    #[serde(default)]
    pub level: u32,
    #[serde(default, deserialize_with = "lenient_list")]
    pub firearm: Vec<FirearmAttack>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirearmAttack {
    #[serde(default, deserialize_with = "lenient_string")]
    pub firearm_atk_type: String,
    #[serde(default)]
    pub firearm_atk_value: Value,
}

// ============================================================================
// Modules
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    #[serde(default, deserialize_with = "lenient_string")]
    pub module_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub module_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_socket_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub module_stat: Vec<ModuleStat>,
}

/// Module stats at one enhancement level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleStat {
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub module_capacity: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
}

// ============================================================================
// Stat names
// ============================================================================

/// Raw record from the stat dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub stat_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub stat_name: String,
}

/// Stat identifier to display name lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatNameMap {
    names: HashMap<String, String>,
}

impl StatNameMap {
    /// Build the lookup from stat dataset records. Later duplicates win.
    pub fn from_records(records: &[StatRecord]) -> Self {
        let names = records
            .iter()
            .map(|r| (r.stat_id.clone(), r.stat_name.clone()))
            .collect();
        StatNameMap { names }
    }

    /// Get the display name for a stat identifier, if known
    pub fn get(&self, stat_id: &str) -> Option<&str> {
        self.names.get(stat_id).map(String::as_str)
    }

    /// Resolve a stat identifier, falling back to `Unknown Stat (<id>)`
    pub fn resolve(&self, stat_id: &str) -> String {
        match self.get(stat_id) {
            Some(name) => name.to_string(),
            None => format!("Unknown Stat ({})", stat_id),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StatNameMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        StatNameMap {
            names: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// ============================================================================
// Value rendering
// ============================================================================

/// Render a JSON scalar the way it reads in a table cell
///
/// Strings are shown without quotes, null as an empty cell, and everything
/// else with its JSON text (`100`, `0.25`, `true`).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(display_value(&value))
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
