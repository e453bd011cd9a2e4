//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod audit;
pub mod auth;
pub mod budgets;
pub mod categories;
pub mod goals;
pub mod preferences;
pub mod summary;
pub mod transactions;

// Re-export all handlers for use in router
pub use audit::*;
pub use auth::*;
pub use budgets::*;
pub use categories::*;
pub use goals::*;
pub use preferences::*;
pub use summary::*;
pub use transactions::*;
