use chrono::NaiveDate;

use super::{authenticate, validate_date, validate_year, Tracker};
use crate::error::Result;
use crate::models::{Breakdown, CategoryTotal, Summary, Transaction, TransactionFilter, TransactionType};
use crate::period::{DateRange, Month, SummaryPeriod};
use crate::summary::{category_breakdown, monthly_breakdown, sum_by_type, yearly_breakdown};

impl Tracker {
    /// Totals for a month, with expenses broken down by category
    pub fn get_monthly_summary(&self, caller: Option<&str>, month: Month) -> Result<Summary> {
        self.get_summary(caller, SummaryPeriod::Month(month))
    }

    /// Totals for a year, with one entry per month
    pub fn get_yearly_summary(&self, caller: Option<&str>, year: i32) -> Result<Summary> {
        self.get_summary(caller, SummaryPeriod::Year(year))
    }

    /// Totals over every transaction, with one entry per year (newest first)
    pub fn get_all_time_summary(&self, caller: Option<&str>) -> Result<Summary> {
        self.get_summary(caller, SummaryPeriod::AllTime)
    }

    pub fn get_summary(&self, caller: Option<&str>, period: SummaryPeriod) -> Result<Summary> {
        let user = authenticate(caller)?;
        if let SummaryPeriod::Year(year) = period {
            validate_year(year)?;
        }
        let transactions = self.load_range(user, period.range(), None)?;
        let (income, expenses) = sum_by_type(&transactions);

        let breakdown = match period {
            SummaryPeriod::Month(_) => {
                let categories = self.category_map(user)?;
                let spending = transactions
                    .iter()
                    .filter(|t| t.transaction_type == TransactionType::Expense);
                Breakdown::ByCategory(category_breakdown(spending, &categories))
            }
            SummaryPeriod::Year(year) => Breakdown::ByMonth(monthly_breakdown(year, &transactions)),
            SummaryPeriod::AllTime => Breakdown::ByYear(yearly_breakdown(&transactions)),
        };

        Ok(Summary {
            income,
            expenses,
            balance: income - expenses,
            transaction_count: transactions.len(),
            breakdown,
        })
    }

    /// Per-category totals for a date range, largest first.
    ///
    /// Defaults to expenses when no type is given.
    pub fn get_spending_by_category(
        &self,
        caller: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<CategoryTotal>> {
        let user = authenticate(caller)?;
        for (field, bound) in [("start_date", start_date), ("end_date", end_date)] {
            if let Some(date) = bound {
                validate_date(field, date)?;
            }
        }
        let kind = transaction_type.unwrap_or(TransactionType::Expense);
        let transactions = self.load_range(user, DateRange::new(start_date, end_date), Some(kind))?;
        let categories = self.category_map(user)?;
        Ok(category_breakdown(&transactions, &categories))
    }

    fn load_range(
        &self,
        user: &str,
        range: DateRange,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<Transaction>> {
        self.db.list_transactions(
            user,
            &TransactionFilter {
                transaction_type,
                start_date: range.from,
                end_date: range.to,
                ..Default::default()
            },
        )
    }
}
