//! Request-level operations
//!
//! Every public method takes the caller identity supplied by whatever sits in
//! front (HTTP middleware, the CLI's `--user`). A missing identity is rejected
//! with [`Error::Unauthenticated`] before anything is read. Rows owned by
//! someone else look exactly like missing rows.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Utc};

use crate::db::{AuditEntry, Database};
use crate::error::{Error, Result};
use crate::models::Category;
use crate::period::SUPPORTED_YEARS;

mod budgets;
mod categories;
mod preferences;
mod savings;
mod summary;
mod transactions;

/// Default page size for recent transactions
pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Clone)]
pub struct Tracker {
    db: Database,
    today: Option<NaiveDate>,
}

impl Tracker {
    pub fn new(db: Database) -> Self {
        Self { db, today: None }
    }

    /// Pin "today" (tests, reproducible propagation)
    pub fn with_today(db: Database, today: NaiveDate) -> Self {
        Self {
            db,
            today: Some(today),
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Last year that budget propagation reaches (December inclusive)
    pub fn horizon_year(&self) -> i32 {
        self.today().year() + 1
    }

    /// The caller's own audit entries, newest first
    pub fn get_audit_log(&self, caller: Option<&str>, limit: i64) -> Result<Vec<AuditEntry>> {
        let user = authenticate(caller)?;
        self.db.list_audit_log(user, limit)
    }

    /// Category owned by `user`, or `NotFoundOrUnauthorized`
    fn owned_category(&self, user: &str, id: i64) -> Result<Category> {
        match self.db.get_category(id)? {
            Some(c) if c.user_id == user => Ok(c),
            _ => Err(Error::not_found("Category")),
        }
    }

    /// Category a new row may reference, or `InvalidCategory`
    fn referenced_category(&self, user: &str, id: i64) -> Result<Category> {
        match self.db.get_category(id)? {
            Some(c) if c.user_id == user => Ok(c),
            _ => Err(Error::InvalidCategory),
        }
    }

    fn category_map(&self, user: &str) -> Result<HashMap<i64, Category>> {
        Ok(self
            .db
            .list_categories(user, None)?
            .into_iter()
            .map(|c| (c.id, c))
            .collect())
    }
}

/// Resolve the caller, rejecting absent or blank identities
pub(crate) fn authenticate(caller: Option<&str>) -> Result<&str> {
    match caller.map(str::trim) {
        Some(user) if !user.is_empty() => Ok(user),
        _ => Err(Error::Unauthenticated),
    }
}

/// Amounts must be real, non-negative numbers
pub(crate) fn validate_amount(field: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidData(format!(
            "{} must be a non-negative number, got {}",
            field, amount
        )));
    }
    Ok(())
}

pub(crate) fn validate_year(year: i32) -> Result<()> {
    if !SUPPORTED_YEARS.contains(&year) {
        return Err(Error::InvalidData(format!(
            "Year {} is out of range ({}-{})",
            year,
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        )));
    }
    Ok(())
}

/// Dates are stored as `YYYY-MM-DD` text and compared as strings
pub(crate) fn validate_date(field: &str, date: NaiveDate) -> Result<()> {
    validate_year(date.year())
        .map_err(|_| Error::InvalidData(format!("{} {} is out of range", field, date)))
}

#[cfg(test)]
mod tests;
