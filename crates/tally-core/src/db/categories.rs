//! Category operations

use rusqlite::{params, OptionalExtension, Row, TransactionBehavior};
use tracing::info;

use super::{parse_column, parse_datetime, Database};
use crate::error::Result;
use crate::models::{Category, CategoryType, CategoryUpdate, NewCategory};

/// Categories seeded for a new user: (name, type, color, icon)
pub const DEFAULT_CATEGORIES: [(&str, CategoryType, &str, &str); 13] = [
    ("Salary", CategoryType::Income, "#10B981", "💼"),
    ("Freelance", CategoryType::Income, "#3B82F6", "💻"),
    ("Investment", CategoryType::Income, "#8B5CF6", "📈"),
    ("Other Income", CategoryType::Income, "#06B6D4", "💰"),
    ("Food & Dining", CategoryType::Expense, "#EF4444", "🍽️"),
    ("Transportation", CategoryType::Expense, "#F59E0B", "🚗"),
    ("Shopping", CategoryType::Expense, "#EC4899", "🛍️"),
    ("Entertainment", CategoryType::Expense, "#8B5CF6", "🎬"),
    ("Bills & Utilities", CategoryType::Expense, "#6B7280", "📄"),
    ("Healthcare", CategoryType::Expense, "#10B981", "🏥"),
    ("Education", CategoryType::Expense, "#3B82F6", "📚"),
    ("Travel", CategoryType::Expense, "#06B6D4", "✈️"),
    ("Other Expenses", CategoryType::Expense, "#6B7280", "📦"),
];

const CATEGORY_COLUMNS: &str = "id, user_id, name, type, color, icon, is_default, created_at";

impl Database {
    fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
        let type_str: String = row.get(3)?;
        let created_at_str: String = row.get(7)?;

        Ok(Category {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            category_type: parse_column(3, &type_str)?,
            color: row.get(4)?,
            icon: row.get(5)?,
            is_default: row.get(6)?,
            created_at: parse_datetime(&created_at_str),
        })
    }

    /// Insert a category for a user
    pub fn insert_category(
        &self,
        user_id: &str,
        category: &NewCategory,
        is_default: bool,
    ) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO categories (user_id, name, type, color, icon, is_default) VALUES (?, ?, ?, ?, ?, ?)",
            params![
                user_id,
                category.name,
                category.category_type.as_str(),
                category.color,
                category.icon,
                is_default,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a category by ID, regardless of owner
    pub fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                &format!("SELECT {} FROM categories WHERE id = ?", CATEGORY_COLUMNS),
                params![id],
                Self::row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    /// List a user's categories, optionally filtered by type
    pub fn list_categories(
        &self,
        user_id: &str,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let categories = match category_type {
            Some(t) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM categories WHERE user_id = ? AND type = ? ORDER BY id",
                    CATEGORY_COLUMNS
                ))?;
                let rows = stmt.query_map(params![user_id, t.as_str()], Self::row_to_category)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM categories WHERE user_id = ? ORDER BY type, id",
                    CATEGORY_COLUMNS
                ))?;
                let rows = stmt.query_map(params![user_id], Self::row_to_category)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(categories)
    }

    /// Update a category's name, color and icon
    pub fn update_category(&self, id: i64, update: &CategoryUpdate) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE categories SET name = ?, color = ?, icon = ? WHERE id = ?",
            params![update.name, update.color, update.icon, id],
        )?;
        Ok(())
    }

    /// Hard-delete a category. Transactions and budgets keep their reference.
    pub fn delete_category(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM categories WHERE id = ?", params![id])?;
        Ok(())
    }

    /// Seed the default categories for a user who has none yet
    ///
    /// Returns the number of categories inserted (0 if the user already had any).
    pub fn seed_default_categories(&self, user_id: &str) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: i64 = tx.query_row(
            "SELECT COUNT(*) FROM categories WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;

        if existing > 0 {
            return Ok(0);
        }

        for (name, category_type, color, icon) in &DEFAULT_CATEGORIES {
            tx.execute(
                "INSERT INTO categories (user_id, name, type, color, icon, is_default) VALUES (?, ?, ?, ?, ?, 1)",
                params![user_id, name, category_type.as_str(), color, icon],
            )?;
        }
        tx.commit()?;

        info!(user = %user_id, count = DEFAULT_CATEGORIES.len(), "Seeded default categories");
        Ok(DEFAULT_CATEGORIES.len())
    }
}
