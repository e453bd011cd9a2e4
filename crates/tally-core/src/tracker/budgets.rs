use tracing::debug;

use super::{authenticate, validate_amount, Tracker};
use crate::db::BudgetWrite;
use crate::error::{Error, Result};
use crate::models::{Budget, BudgetWithDetails, SetBudget, TransactionFilter, TransactionType};
use crate::period::Month;
use crate::summary::{budget_progress, spent_in};

impl Tracker {
    /// Budgets for a month with spending against each.
    ///
    /// A category budget counts that category's expenses; a whole-month
    /// budget counts every expense in the month.
    pub fn get_budgets(&self, caller: Option<&str>, month: Month) -> Result<Vec<BudgetWithDetails>> {
        let user = authenticate(caller)?;
        let budgets = self.db.list_budgets(user, month)?;
        if budgets.is_empty() {
            return Ok(Vec::new());
        }

        let range = month.range();
        let expenses = self.db.list_transactions(
            user,
            &TransactionFilter {
                transaction_type: Some(TransactionType::Expense),
                start_date: range.from,
                end_date: range.to,
                ..Default::default()
            },
        )?;
        let categories = self.category_map(user)?;
        let next = month.next();

        budgets
            .into_iter()
            .map(|budget| -> Result<BudgetWithDetails> {
                let spent = spent_in(&expenses, range, budget.category_id);
                let (remaining, percentage) = budget_progress(budget.amount, spent);
                let is_recurring = self.db.budget_exists(user, budget.category_id, next)?;
                let category = budget
                    .category_id
                    .and_then(|id| categories.get(&id).cloned());

                Ok(BudgetWithDetails {
                    budget,
                    category,
                    spent,
                    remaining,
                    percentage,
                    is_recurring,
                })
            })
            .collect()
    }

    /// The budget row for one (category-or-none, month) pair, if set.
    ///
    /// Category ids start at 1; `None` selects the whole-month budget.
    pub fn get_budget(
        &self,
        caller: Option<&str>,
        category_id: Option<i64>,
        month: Month,
    ) -> Result<Option<Budget>> {
        let user = authenticate(caller)?;
        if category_id.is_some_and(|id| id <= 0) {
            return Err(Error::InvalidCategory);
        }
        self.db.find_budget(user, category_id, month)
    }

    /// Create or update a budget, optionally propagating it forward or
    /// clearing later months through December of next year
    pub fn set_budget(&self, caller: Option<&str>, budget: &SetBudget) -> Result<BudgetWrite> {
        let user = authenticate(caller)?;
        validate_amount("amount", budget.amount)?;
        if let Some(category_id) = budget.category_id {
            self.referenced_category(user, category_id)?;
        }

        let horizon = self.horizon_year();
        let write = self.db.set_budget_series(user, budget, horizon)?;
        debug!(
            user = %user,
            month = %budget.month,
            inserted = write.inserted,
            propagated = write.propagated,
            horizon,
            "Set budget"
        );
        Ok(write)
    }

    /// Delete one budget row; other months are left alone
    pub fn delete_budget(&self, caller: Option<&str>, id: i64) -> Result<()> {
        let user = authenticate(caller)?;
        match self.db.get_budget(id)? {
            Some(b) if b.user_id == user => self.db.delete_budget(id),
            _ => Err(Error::not_found("Budget")),
        }
    }
}
