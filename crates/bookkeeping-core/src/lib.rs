//! Core types and traits for bookkeeping storage backends.
//!
//! This crate provides the `AccountStore` and `JournalStore` traits and all
//! associated types, enabling pluggable storage implementations in separate crates.

pub mod models;
pub mod pattern;
pub mod storage;

// Re-export key types at crate root for convenience
pub use models::{Account, AccountCode, Amount, Side, MAX_AMOUNT};
pub use models::write::JournalLine;
pub use models::read::{JournalId, JournalRecord};
pub use storage::{AccountFilter, AccountStore, JournalFilter, JournalStore, StorageError};
