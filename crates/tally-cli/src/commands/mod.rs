//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, open_tracker)
//! - `budgets` - Budget commands (list, set, delete)
//! - `categories` - Category commands (list, add, update, delete, seed)
//! - `goals` - Savings goal commands
//! - `prefs` - Preference commands
//! - `serve` - Web server command
//! - `summary` - Summary and spending reports
//! - `transactions` - Transaction commands

pub mod budgets;
pub mod categories;
pub mod core;
pub mod goals;
pub mod prefs;
pub mod serve;
pub mod summary;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use categories::*;
pub use core::*;
pub use goals::*;
pub use prefs::*;
pub use serve::*;
pub use summary::*;
pub use transactions::*;

use anyhow::Result;
use serde::Serialize;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Green for income, red for expenses
pub fn colored_amount(amount: f64, income: bool) -> String {
    if income {
        format!("\x1b[32m+{:.2}\x1b[0m", amount)
    } else {
        format!("\x1b[31m-{:.2}\x1b[0m", amount)
    }
}
