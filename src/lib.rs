//! Household Ledger - expense tracking for a family
//!
//! This library provides the core functionality for the `ledger` binary: a
//! household expense ledger stored in a single SQLite file, with spending
//! categories, per-category budgets, recurring monthly expenses and
//! month-over-month reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings (category taxonomy)
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, budgets, money)
//! - `storage`: SQLite storage layer and schema migrations
//! - `services`: Business logic layer (category policy, validation)
//! - `reports`: Pure aggregations over loaded expenses
//! - `ingest`: Parsing of extraction replies into candidate expenses
//! - `export`: CSV and database file export
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use household_ledger::config::{LedgerPaths, Settings};
//! use household_ledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths, settings)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
