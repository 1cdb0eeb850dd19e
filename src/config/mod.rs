//! Configuration module for the household ledger
//!
//! This module provides configuration management including:
//! - Process-relative path resolution
//! - User settings persistence, including the default category taxonomy

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{Settings, Taxonomy, TaxonomyGroup};
