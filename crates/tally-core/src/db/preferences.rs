//! Per-user preferences (one row per user)

use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::error::Result;
use crate::models::{PreferencesUpdate, UserPreferences, DEFAULT_CURRENCY, DEFAULT_VIEW};

const PREFERENCE_COLUMNS: &str = "id, user_id, dark_mode, currency, default_view";

fn row_to_preferences(row: &Row) -> rusqlite::Result<UserPreferences> {
    Ok(UserPreferences {
        id: row.get(0)?,
        user_id: row.get(1)?,
        dark_mode: row.get(2)?,
        currency: row.get(3)?,
        default_view: row.get(4)?,
    })
}

impl Database {
    pub fn get_preferences(&self, user_id: &str) -> Result<Option<UserPreferences>> {
        let conn = self.conn()?;
        let prefs = conn
            .query_row(
                &format!(
                    "SELECT {} FROM user_preferences WHERE user_id = ?",
                    PREFERENCE_COLUMNS
                ),
                params![user_id],
                row_to_preferences,
            )
            .optional()?;
        Ok(prefs)
    }

    /// Return the user's preferences, inserting the defaults on first use
    pub fn get_or_create_preferences(&self, user_id: &str) -> Result<UserPreferences> {
        let conn = self.conn()?;
        // Concurrent first reads race on the UNIQUE user_id; the loser is a no-op
        conn.execute(
            r#"
            INSERT INTO user_preferences (user_id, dark_mode, currency, default_view)
            VALUES (?, 0, ?, ?)
            ON CONFLICT(user_id) DO NOTHING
            "#,
            params![user_id, DEFAULT_CURRENCY, DEFAULT_VIEW],
        )?;

        let prefs = conn.query_row(
            &format!(
                "SELECT {} FROM user_preferences WHERE user_id = ?",
                PREFERENCE_COLUMNS
            ),
            params![user_id],
            row_to_preferences,
        )?;
        Ok(prefs)
    }

    /// Apply a partial patch; unset fields keep their stored value
    pub fn update_preferences(&self, user_id: &str, update: &PreferencesUpdate) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            UPDATE user_preferences
            SET dark_mode = COALESCE(?, dark_mode),
                currency = COALESCE(?, currency),
                default_view = COALESCE(?, default_view)
            WHERE user_id = ?
            "#,
            params![
                update.dark_mode,
                update.currency,
                update.default_view,
                user_id
            ],
        )?;
        Ok(())
    }
}
