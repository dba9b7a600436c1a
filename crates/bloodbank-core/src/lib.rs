//! # Blood Bank Core
//!
//! Core library for Blood Bank - a stock ledger for a blood bank, backed by a
//! single JSON document.
//!
//! This crate provides the ledger engine, storage backends and data model
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **storage**: backend trait, JSON file and in-memory backends, data model
//! - **store**: the `DocumentStore` handle (load, defaults, save, rollback)
//! - **audit**: timestamped audit log lines
//! - **ledger**: validated credit/debit over inventory
//! - **records**: donation and request flows
//! - **query**: low-stock alerts, listings, totals, search, history, reports
//! - **validate**: per-field input rules
//!
//! The store is single-writer. Nothing prevents two processes from opening the
//! same file; if they do, the last save wins.

pub mod audit;
pub mod blood_type;
pub mod error;
pub mod fs;
pub mod ledger;
pub mod query;
pub mod records;
pub mod storage;
pub mod store;
pub mod validate;

pub use blood_type::BloodType;
pub use error::{BloodBankError, Result, ValidationError};
pub use storage::StorageBackend;
pub use store::{CorruptionPolicy, DocumentStore, LoadOutcome, StoreOptions};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
