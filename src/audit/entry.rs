//! Audit entries
//!
//! An entry names the record it touched by its real key (row id for
//! expenses and fixed expenses, name for categories and budgets) and carries
//! the JSON snapshot(s) of the change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::generate_diff;

/// The record an audit entry refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity", content = "key", rename_all = "snake_case")]
pub enum AuditSubject {
    Expense(i64),
    FixedExpense(i64),
    Category(String),
    Budget(String),
}

impl fmt::Display for AuditSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense(id) => write!(f, "expense #{}", id),
            Self::FixedExpense(id) => write!(f, "fixed expense #{}", id),
            Self::Category(name) => write!(f, "category {}", name),
            Self::Budget(category) => write!(f, "budget {}", category),
        }
    }
}

/// What happened to the record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Change {
    Created {
        after: Value,
    },
    Updated {
        before: Value,
        after: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diff: Option<String>,
    },
    Deleted {
        before: Value,
    },
}

fn snapshot<T: Serialize>(record: &T) -> Value {
    serde_json::to_value(record).unwrap_or(Value::Null)
}

impl Change {
    pub fn created<T: Serialize>(record: &T) -> Self {
        Self::Created {
            after: snapshot(record),
        }
    }

    /// An update, with the changed fields summarized
    pub fn updated<T: Serialize>(before: &T, after: &T) -> Self {
        let before = snapshot(before);
        let after = snapshot(after);
        let diff = generate_diff(&before, &after);
        Self::Updated {
            before,
            after,
            diff,
        }
    }

    pub fn deleted<T: Serialize>(record: &T) -> Self {
        Self::Deleted {
            before: snapshot(record),
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Self::Created { .. } => "added",
            Self::Updated { .. } => "changed",
            Self::Deleted { .. } => "removed",
        }
    }
}

/// One line of the audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub subject: AuditSubject,
    /// Item label, when the key alone says little (expense ids)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub change: Change,
}

impl AuditEntry {
    /// Stamp a change with the current time
    pub fn now(subject: AuditSubject, label: Option<&str>, change: Change) -> Self {
        Self {
            at: Utc::now(),
            subject,
            label: label.map(str::to_string),
            change,
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<7} {}",
            self.at.format("%Y-%m-%d %H:%M"),
            self.change.verb(),
            self.subject
        )?;
        if let Some(label) = &self.label {
            write!(f, " ({})", label)?;
        }
        if let Change::Updated {
            diff: Some(diff), ..
        } = &self.change
        {
            write!(f, ": {}", diff)?;
        }
        Ok(())
    }
}
