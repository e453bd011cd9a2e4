//! Savings goal operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_date_column, parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewSavingsGoal, SavingsGoal, SavingsGoalUpdate};

const GOAL_COLUMNS: &str =
    "id, user_id, name, target_amount, current_amount, target_date, description, created_at";

impl Database {
    fn row_to_savings_goal(row: &Row) -> rusqlite::Result<SavingsGoal> {
        let target_amount: f64 = row.get(3)?;
        let current_amount: f64 = row.get(4)?;
        let target_date_str: String = row.get(5)?;
        let created_at_str: String = row.get(7)?;

        Ok(SavingsGoal {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            target_amount,
            current_amount,
            target_date: parse_date_column(5, &target_date_str)?,
            description: row.get(6)?,
            is_completed: current_amount >= target_amount,
            created_at: parse_datetime(&created_at_str),
        })
    }

    /// Insert a goal with no progress yet
    pub fn insert_savings_goal(&self, user_id: &str, goal: &NewSavingsGoal) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO savings_goals (user_id, name, target_amount, target_date, description)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                goal.name,
                goal.target_amount,
                goal.target_date.to_string(),
                goal.description,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a goal by ID, regardless of owner
    pub fn get_savings_goal(&self, id: i64) -> Result<Option<SavingsGoal>> {
        let conn = self.conn()?;
        let goal = conn
            .query_row(
                &format!("SELECT {} FROM savings_goals WHERE id = ?", GOAL_COLUMNS),
                params![id],
                Self::row_to_savings_goal,
            )
            .optional()?;
        Ok(goal)
    }

    /// List a user's goals, newest first
    pub fn list_savings_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM savings_goals WHERE user_id = ? ORDER BY id DESC",
            GOAL_COLUMNS
        ))?;

        let goals = stmt
            .query_map(params![user_id], Self::row_to_savings_goal)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(goals)
    }

    /// Update name, target and description; progress is left alone
    pub fn update_savings_goal(&self, id: i64, update: &SavingsGoalUpdate) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            UPDATE savings_goals
            SET name = ?, target_amount = ?, target_date = ?, description = ?
            WHERE id = ?
            "#,
            params![
                update.name,
                update.target_amount,
                update.target_date.to_string(),
                update.description,
                id,
            ],
        )?;
        Ok(())
    }

    /// Overwrite the saved amount
    pub fn set_savings_progress(&self, id: i64, current_amount: f64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE savings_goals SET current_amount = ? WHERE id = ?",
            params![current_amount, id],
        )?;
        Ok(())
    }

    pub fn delete_savings_goal(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM savings_goals WHERE id = ?", params![id])?;
        Ok(())
    }
}
