use super::{authenticate, validate_amount, validate_date, Tracker, DEFAULT_RECENT_LIMIT};
use crate::error::{Error, Result};
use crate::models::{
    NewTransaction, Transaction, TransactionFilter, TransactionUpdate, TransactionWithCategory,
};

impl Tracker {
    /// Filtered transactions, newest first, each joined with its category
    pub fn get_transactions(
        &self,
        caller: Option<&str>,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionWithCategory>> {
        let user = authenticate(caller)?;
        if let Some(start) = filter.start_date {
            validate_date("start_date", start)?;
        }
        if let Some(end) = filter.end_date {
            validate_date("end_date", end)?;
        }
        let transactions = self.db.list_transactions(user, filter)?;
        self.with_categories(user, transactions)
    }

    /// Newest transactions; a missing or zero limit means the default of 10
    pub fn get_recent_transactions(
        &self,
        caller: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<TransactionWithCategory>> {
        let filter = TransactionFilter {
            limit: Some(limit.filter(|&n| n > 0).unwrap_or(DEFAULT_RECENT_LIMIT)),
            ..Default::default()
        };
        self.get_transactions(caller, &filter)
    }

    pub fn get_transaction(&self, caller: Option<&str>, id: i64) -> Result<TransactionWithCategory> {
        let user = authenticate(caller)?;
        let transaction = self.owned_transaction(user, id)?;
        let category = self
            .db
            .get_category(transaction.category_id)?
            .filter(|c| c.user_id == user);
        Ok(TransactionWithCategory {
            transaction,
            category,
        })
    }

    pub fn create_transaction(
        &self,
        caller: Option<&str>,
        transaction: &NewTransaction,
    ) -> Result<i64> {
        let user = authenticate(caller)?;
        validate_amount("amount", transaction.amount)?;
        validate_date("date", transaction.date)?;
        if let Some(end) = transaction.recurrence.and_then(|r| r.end_date) {
            validate_date("recurrence end_date", end)?;
        }
        self.referenced_category(user, transaction.category_id)?;
        self.db.insert_transaction(user, transaction)
    }

    /// Same as [`Tracker::create_transaction`]
    pub fn add_transaction(&self, caller: Option<&str>, transaction: &NewTransaction) -> Result<i64> {
        self.create_transaction(caller, transaction)
    }

    pub fn update_transaction(
        &self,
        caller: Option<&str>,
        id: i64,
        update: &TransactionUpdate,
    ) -> Result<()> {
        let user = authenticate(caller)?;
        self.owned_transaction(user, id)?;
        validate_amount("amount", update.amount)?;
        validate_date("date", update.date)?;
        self.referenced_category(user, update.category_id)?;
        self.db.update_transaction(id, update)
    }

    pub fn delete_transaction(&self, caller: Option<&str>, id: i64) -> Result<()> {
        let user = authenticate(caller)?;
        self.owned_transaction(user, id)?;
        self.db.delete_transaction(id)
    }

    fn owned_transaction(&self, user: &str, id: i64) -> Result<Transaction> {
        match self.db.get_transaction(id)? {
            Some(t) if t.user_id == user => Ok(t),
            _ => Err(Error::not_found("Transaction")),
        }
    }

    fn with_categories(
        &self,
        user: &str,
        transactions: Vec<Transaction>,
    ) -> Result<Vec<TransactionWithCategory>> {
        let categories = self.category_map(user)?;
        Ok(transactions
            .into_iter()
            .map(|transaction| TransactionWithCategory {
                category: categories.get(&transaction.category_id).cloned(),
                transaction,
            })
            .collect())
    }
}
