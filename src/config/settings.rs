//! User settings for the household ledger
//!
//! Holds the default category taxonomy, the sentinel category name and
//! display preferences. Settings are loaded once at startup and handed to
//! [`crate::storage::Storage`], so the taxonomy has a single source of truth.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::{ConsumptionType, Spender};

/// Categories seeded under one consumption type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyGroup {
    pub consumption_type: ConsumptionType,
    pub categories: Vec<String>,
}

impl TaxonomyGroup {
    fn new(consumption_type: ConsumptionType, categories: &[&str]) -> Self {
        Self {
            consumption_type,
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// The built-in category taxonomy used to seed a fresh ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    pub groups: Vec<TaxonomyGroup>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            groups: vec![
                TaxonomyGroup::new(
                    ConsumptionType::Essential,
                    &[
                        "Living",
                        "Medical/Beauty",
                        "Transportation",
                        "Utilities/Housing",
                        "Gifts/Social",
                    ],
                ),
                TaxonomyGroup::new(
                    ConsumptionType::Discretionary,
                    &[
                        "Dining/Snacks",
                        "Durable Goods",
                        "Shopping",
                        "Culture/Education",
                        "Other",
                    ],
                ),
            ],
        }
    }
}

impl Taxonomy {
    /// All category names, in taxonomy order
    pub fn names(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.categories.iter().map(String::as_str))
            .collect()
    }

    /// `(name, type)` pairs, in taxonomy order
    pub fn entries(&self) -> impl Iterator<Item = (&str, ConsumptionType)> {
        self.groups.iter().flat_map(|g| {
            g.categories
                .iter()
                .map(move |c| (c.as_str(), g.consumption_type))
        })
    }

    /// Consumption type of a taxonomy member
    pub fn type_of(&self, name: &str) -> Option<ConsumptionType> {
        self.entries()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, t)| t)
    }
}

/// User settings for the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Suffix appended to amounts in terminal output
    #[serde(default = "default_currency_suffix")]
    pub currency_suffix: String,

    /// Spender assumed when an entry names none
    #[serde(default)]
    pub default_spender: Spender,

    /// Category that absorbs references to deleted or unknown categories
    #[serde(default = "default_unclassified_category")]
    pub unclassified_category: String,

    /// Categories seeded on first run
    #[serde(default)]
    pub taxonomy: Taxonomy,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_suffix() -> String {
    "원".to_string()
}

fn default_unclassified_category() -> String {
    "unclassified".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_suffix: default_currency_suffix(),
            default_spender: Spender::default(),
            unclassified_category: default_unclassified_category(),
            taxonomy: Taxonomy::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the storage layer cannot honor
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.unclassified_category.trim().is_empty() {
            return Err(LedgerError::Config(
                "unclassified_category cannot be empty".into(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for name in self.taxonomy.names() {
            if !seen.insert(name) {
                return Err(LedgerError::Config(format!(
                    "Category '{}' appears twice in the taxonomy",
                    name
                )));
            }
        }

        Ok(())
    }
}
