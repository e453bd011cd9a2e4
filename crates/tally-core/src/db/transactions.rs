//! Transaction operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_column, parse_date_column, parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewTransaction, Recurrence, Transaction, TransactionFilter, TransactionUpdate};

const TRANSACTION_COLUMNS: &str = "id, user_id, amount, type, category_id, date, description, \
     recurring_frequency, recurring_end_date, created_at";

impl Database {
    fn row_to_transaction(row: &Row) -> rusqlite::Result<Transaction> {
        let type_str: String = row.get(3)?;
        let date_str: String = row.get(5)?;
        let frequency_str: Option<String> = row.get(7)?;
        let end_date_str: Option<String> = row.get(8)?;
        let created_at_str: String = row.get(9)?;

        let recurrence = match frequency_str {
            Some(freq) => Some(Recurrence {
                frequency: parse_column(7, &freq)?,
                end_date: end_date_str
                    .as_deref()
                    .map(|s| parse_date_column(8, s))
                    .transpose()?,
            }),
            None => None,
        };

        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount: row.get(2)?,
            transaction_type: parse_column(3, &type_str)?,
            category_id: row.get(4)?,
            date: parse_date_column(5, &date_str)?,
            description: row.get(6)?,
            recurrence,
            created_at: parse_datetime(&created_at_str),
        })
    }

    /// Insert a transaction for a user
    pub fn insert_transaction(&self, user_id: &str, tx: &NewTransaction) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO transactions (user_id, amount, type, category_id, date, description, recurring_frequency, recurring_end_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.amount,
                tx.transaction_type.as_str(),
                tx.category_id,
                tx.date.to_string(),
                tx.description,
                tx.recurrence.map(|r| r.frequency.as_str()),
                tx.recurrence.and_then(|r| r.end_date).map(|d| d.to_string()),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a transaction by ID, regardless of owner
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions WHERE id = ?",
                    TRANSACTION_COLUMNS
                ),
                params![id],
                Self::row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    /// List a user's transactions, newest first
    pub fn list_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        // Build dynamic WHERE clause
        let mut conditions = vec!["user_id = ?".to_string()];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id.to_string())];

        if let Some(t) = filter.transaction_type {
            conditions.push("type = ?".to_string());
            params.push(Box::new(t.as_str()));
        }

        if let Some(category_id) = filter.category_id {
            conditions.push("category_id = ?".to_string());
            params.push(Box::new(category_id));
        }

        if let Some(start) = filter.start_date {
            conditions.push("date >= ?".to_string());
            params.push(Box::new(start.to_string()));
        }

        if let Some(end) = filter.end_date {
            conditions.push("date <= ?".to_string());
            params.push(Box::new(end.to_string()));
        }

        let limit_clause = match filter.limit {
            Some(limit) => {
                params.push(Box::new(limit as i64));
                "LIMIT ?"
            }
            None => "",
        };

        let sql = format!(
            "SELECT {} FROM transactions WHERE {} ORDER BY date DESC, id DESC {}",
            TRANSACTION_COLUMNS,
            conditions.join(" AND "),
            limit_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let transactions = stmt
            .query_map(params_refs.as_slice(), Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Overwrite a transaction's editable fields
    pub fn update_transaction(&self, id: i64, update: &TransactionUpdate) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE transactions SET amount = ?, category_id = ?, date = ?, description = ? WHERE id = ?",
            params![
                update.amount,
                update.category_id,
                update.date.to_string(),
                update.description,
                id,
            ],
        )?;
        Ok(())
    }

    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        Ok(())
    }
}
