//! Pure aggregation over in-memory transaction lists
//!
//! Nothing here touches the database. [`crate::tracker`] loads the rows and
//! hands them over; these functions only add things up.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::models::{Category, CategoryTotal, PeriodTotal, Transaction, TransactionType};
use crate::period::{DateRange, Month};

/// Sum of amounts split by direction: `(income, expenses)`
pub fn sum_by_type<'a, I>(transactions: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold((0.0, 0.0), |(income, expenses), t| match t.transaction_type {
            TransactionType::Income => (income + t.amount, expenses),
            TransactionType::Expense => (income, expenses + t.amount),
        })
}

/// Total spent in a range: expenses only, optionally restricted to one category
pub fn spent_in<'a, I>(transactions: I, range: DateRange, category_id: Option<i64>) -> f64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.transaction_type == TransactionType::Expense)
        .filter(|t| range.contains(t.date))
        .filter(|t| category_id.map_or(true, |id| t.category_id == id))
        .map(|t| t.amount)
        .sum()
}

/// Group transactions by category id, largest total first.
///
/// Transactions whose category no longer exists keep their own group with
/// `category: None` rather than being dropped.
pub fn category_breakdown<'a, I>(
    transactions: I,
    categories: &HashMap<i64, Category>,
) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for t in transactions {
        let entry = groups.entry(t.category_id).or_insert((0.0, 0));
        entry.0 += t.amount;
        entry.1 += 1;
    }

    let total: f64 = groups.values().map(|(amount, _)| amount).sum();

    let mut totals: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category_id, (amount, transaction_count))| CategoryTotal {
            category_id,
            category: categories.get(&category_id).cloned(),
            amount,
            transaction_count,
            percentage: percentage_of(amount, total),
        })
        .collect();

    // Stable sort keeps category id order for ties
    totals.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    totals
}

/// Twelve `YYYY-MM` buckets for a year, January first. Transactions outside
/// the year are ignored.
pub fn monthly_breakdown<'a, I>(year: i32, transactions: I) -> Vec<PeriodTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months: Vec<PeriodTotal> = (1..=12)
        .map(|m| {
            let label = Month::new(year, m)
                .map(|month| month.to_string())
                .unwrap_or_else(|| format!("{}-{:02}", year, m));
            empty_period(label)
        })
        .collect();

    for t in transactions {
        if t.date.year() != year {
            continue;
        }
        add_to_period(&mut months[t.date.month0() as usize], t);
    }

    months.iter_mut().for_each(close_period);
    months
}

/// One bucket per year that has transactions, newest first
pub fn yearly_breakdown<'a, I>(transactions: I) -> Vec<PeriodTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut years: BTreeMap<i32, PeriodTotal> = BTreeMap::new();
    for t in transactions {
        let year = t.date.year();
        let period = years
            .entry(year)
            .or_insert_with(|| empty_period(year.to_string()));
        add_to_period(period, t);
    }

    years
        .into_values()
        .rev()
        .map(|mut period| {
            close_period(&mut period);
            period
        })
        .collect()
}

/// `(remaining, percentage)` for a budget amount and what has been spent against it
pub fn budget_progress(amount: f64, spent: f64) -> (f64, f64) {
    (amount - spent, percentage_of(spent, amount))
}

fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

fn empty_period(period: String) -> PeriodTotal {
    PeriodTotal {
        period,
        income: 0.0,
        expenses: 0.0,
        balance: 0.0,
        transaction_count: 0,
    }
}

fn add_to_period(period: &mut PeriodTotal, t: &Transaction) {
    match t.transaction_type {
        TransactionType::Income => period.income += t.amount,
        TransactionType::Expense => period.expenses += t.amount,
    }
    period.transaction_count += 1;
}

fn close_period(period: &mut PeriodTotal) {
    period.balance = period.income - period.expenses;
}
