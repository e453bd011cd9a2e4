//! Budget rows, keyed by (user, category-or-none, month)

use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use serde::Serialize;
use tracing::debug;

use super::{parse_column, parse_datetime, Database};
use crate::error::Result;
use crate::models::{Budget, SetBudget};
use crate::period::Month;

const BUDGET_COLUMNS: &str = "id, user_id, category_id, amount, month, created_at";

// NULL category is stored as NULL but compared as 0 so it matches the unique index
const TUPLE_MATCH: &str = "user_id = ? AND IFNULL(category_id, 0) = IFNULL(?, 0)";

/// Outcome of writing a budget and its forward series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetWrite {
    /// Row for the requested month
    pub id: i64,
    /// Whether that row was newly inserted
    pub inserted: bool,
    /// Future rows inserted, updated or deleted by propagation
    pub propagated: usize,
}

fn row_to_budget(row: &Row) -> rusqlite::Result<Budget> {
    let month_str: String = row.get(4)?;
    let created_at_str: String = row.get(5)?;

    Ok(Budget {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category_id: row.get(2)?,
        amount: row.get(3)?,
        month: parse_column(4, &month_str)?,
        created_at: parse_datetime(&created_at_str),
    })
}

fn find_budget_id(
    conn: &Connection,
    user_id: &str,
    category_id: Option<i64>,
    month: Month,
) -> rusqlite::Result<Option<i64>> {
    conn.query_row(
        &format!("SELECT id FROM budgets WHERE {} AND month = ?", TUPLE_MATCH),
        params![user_id, category_id, month.to_string()],
        |row| row.get(0),
    )
    .optional()
}

/// Patch the row for a tuple if it exists, else insert it
fn upsert_budget(
    conn: &Connection,
    user_id: &str,
    category_id: Option<i64>,
    month: Month,
    amount: f64,
) -> rusqlite::Result<(i64, bool)> {
    match find_budget_id(conn, user_id, category_id, month)? {
        Some(id) => {
            conn.execute(
                "UPDATE budgets SET amount = ? WHERE id = ?",
                params![amount, id],
            )?;
            Ok((id, false))
        }
        None => {
            conn.execute(
                "INSERT INTO budgets (user_id, category_id, amount, month) VALUES (?, ?, ?, ?)",
                params![user_id, category_id, amount, month.to_string()],
            )?;
            Ok((conn.last_insert_rowid(), true))
        }
    }
}

impl Database {
    /// Get a budget by ID, regardless of owner
    pub fn get_budget(&self, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                &format!("SELECT {} FROM budgets WHERE id = ?", BUDGET_COLUMNS),
                params![id],
                row_to_budget,
            )
            .optional()?;
        Ok(budget)
    }

    /// Find the budget for one (user, category-or-none, month) tuple
    pub fn find_budget(
        &self,
        user_id: &str,
        category_id: Option<i64>,
        month: Month,
    ) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                &format!(
                    "SELECT {} FROM budgets WHERE {} AND month = ?",
                    BUDGET_COLUMNS, TUPLE_MATCH
                ),
                params![user_id, category_id, month.to_string()],
                row_to_budget,
            )
            .optional()?;
        Ok(budget)
    }

    pub fn budget_exists(
        &self,
        user_id: &str,
        category_id: Option<i64>,
        month: Month,
    ) -> Result<bool> {
        let conn = self.conn()?;
        Ok(find_budget_id(&conn, user_id, category_id, month)?.is_some())
    }

    /// List a user's budgets for a month (whole-month budget first)
    pub fn list_budgets(&self, user_id: &str, month: Month) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM budgets WHERE user_id = ? AND month = ? ORDER BY IFNULL(category_id, 0), id",
            BUDGET_COLUMNS
        ))?;

        let budgets = stmt
            .query_map(params![user_id, month.to_string()], row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// Write a budget and, depending on `apply_to_future_months`, copy it
    /// forward or clear it from later months up to December of `horizon_year`.
    ///
    /// Runs as one IMMEDIATE transaction: either every month is written or none is.
    pub fn set_budget_series(
        &self,
        user_id: &str,
        budget: &SetBudget,
        horizon_year: i32,
    ) -> Result<BudgetWrite> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let (id, inserted) =
            upsert_budget(&tx, user_id, budget.category_id, budget.month, budget.amount)?;

        let mut propagated = 0;
        match budget.apply_to_future_months {
            Some(true) => {
                let mut month = budget.month.next();
                while month.year() <= horizon_year {
                    upsert_budget(&tx, user_id, budget.category_id, month, budget.amount)?;
                    debug!(user = %user_id, month = %month, amount = budget.amount, "Propagated budget");
                    propagated += 1;
                    month = month.next();
                }
            }
            Some(false) => {
                let mut month = budget.month.next();
                while month.year() <= horizon_year {
                    if let Some(future_id) =
                        find_budget_id(&tx, user_id, budget.category_id, month)?
                    {
                        tx.execute("DELETE FROM budgets WHERE id = ?", params![future_id])?;
                        debug!(user = %user_id, month = %month, "Cleared future budget");
                        propagated += 1;
                    }
                    month = month.next();
                }
            }
            None => {}
        }

        tx.commit()?;

        Ok(BudgetWrite {
            id,
            inserted,
            propagated,
        })
    }

    pub fn delete_budget(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;
        Ok(())
    }
}
