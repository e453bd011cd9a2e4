//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Database access and migrations (SQLCipher-backed row store)
//! - Domain models for categories, transactions, budgets and savings goals
//! - Calendar periods (`YYYY-MM` months, summary ranges)
//! - Pure summary aggregation
//! - The [`Tracker`], which authenticates callers and enforces ownership

pub mod db;
pub mod error;
pub mod models;
pub mod period;
pub mod summary;
pub mod tracker;

pub use db::{AuditEntry, BudgetWrite, Database};
pub use error::{Error, Result};
pub use period::{DateRange, Month, SummaryPeriod};
pub use tracker::Tracker;
