//! Category model
//!
//! Categories are free-text names bound to a consumption type. A fresh
//! ledger is seeded from the taxonomy in [`crate::config::Settings`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Essential vs. discretionary classification of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumptionType {
    /// Needs: living costs, medical, transport, housing
    Essential,
    /// Wants: dining out, shopping, hobbies
    Discretionary,
    #[default]
    Unclassified,
}

impl ConsumptionType {
    /// All consumption types in display order
    pub fn all() -> &'static [Self] {
        &[Self::Essential, Self::Discretionary, Self::Unclassified]
    }

    /// Stored text value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Discretionary => "discretionary",
            Self::Unclassified => "unclassified",
        }
    }

    /// Read a stored value; NULL, empty and unknown text are unclassified
    pub fn from_stored(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(Self::Unclassified)
    }
}

impl fmt::Display for ConsumptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConsumptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "essential" | "needs" => Ok(Self::Essential),
            "discretionary" | "wants" => Ok(Self::Discretionary),
            "unclassified" => Ok(Self::Unclassified),
            other => Err(format!(
                "Unknown consumption type '{}' (expected essential, discretionary or unclassified)",
                other
            )),
        }
    }
}

/// A spending category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique name (primary key)
    pub name: String,

    /// Whether the category was seeded from the default taxonomy
    pub is_default: bool,

    pub consumption_type: ConsumptionType,
}

impl Category {
    /// Create a user-defined category
    pub fn new(name: impl Into<String>, consumption_type: ConsumptionType) -> Self {
        Self {
            name: name.into(),
            is_default: false,
            consumption_type,
        }
    }

    /// Create a seeded category
    pub fn seeded(name: impl Into<String>, consumption_type: ConsumptionType) -> Self {
        Self {
            is_default: true,
            ..Self::new(name, consumption_type)
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        let len = self.name.chars().count();
        if len > 50 {
            return Err(CategoryValidationError::NameTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
