//! Domain models for Tally
//!
//! Monetary values are `f64` and summed with plain floating-point addition.
//! There is no rounding or currency-precision policy, so callers should treat
//! totals as potentially imprecise in the last few digits.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::period::Month;

/// Whether money is coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" | "expenses" => Ok(Self::Expense),
            _ => Err(format!("Unknown type: {} (use income or expense)", s)),
        }
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transactions share the income/expense split with categories
pub type TransactionType = CategoryType;

/// A user-owned category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    /// Fixed at creation
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub color: String,
    pub icon: String,
    /// Seeded categories cannot be deleted
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub color: String,
    pub icon: String,
}

/// Editable category fields (type is immutable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: String,
    pub color: String,
    pub icon: String,
}

/// How often a recurring transaction repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl RecurringFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::str::FromStr for RecurringFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for RecurringFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recurrence metadata. Stored as-is; future occurrences are never materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub frequency: RecurringFrequency,
    pub end_date: Option<NaiveDate>,
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    /// Always non-negative; direction comes from `transaction_type`
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// May point at a category that has since been deleted
    pub category_id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub recurrence: Option<Recurrence>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category_id: i64,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub amount: f64,
    pub category_id: i64,
    pub date: NaiveDate,
    pub description: String,
}

/// Optional filters for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub category_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

/// Transaction joined with its category (None if the category was deleted)
#[derive(Debug, Clone, Serialize)]
pub struct TransactionWithCategory {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: Option<Category>,
}

/// A monthly spending limit, for one category or (with no category) the whole month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: String,
    pub category_id: Option<i64>,
    pub amount: f64,
    pub month: Month,
    pub created_at: DateTime<Utc>,
}

/// Arguments for creating or updating a budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetBudget {
    #[serde(default)]
    pub category_id: Option<i64>,
    pub amount: f64,
    pub month: Month,
    /// `Some(true)` copies the amount forward, `Some(false)` clears future months,
    /// `None` only touches `month`
    #[serde(default)]
    pub apply_to_future_months: Option<bool>,
}

/// Budget enriched with computed spending figures
#[derive(Debug, Clone, Serialize)]
pub struct BudgetWithDetails {
    #[serde(flatten)]
    pub budget: Budget,
    pub category: Option<Category>,
    pub spent: f64,
    pub remaining: f64,
    pub percentage: f64,
    /// A budget exists for the same category in the following month
    pub is_recurring: bool,
}

/// A savings target and progress towards it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: NaiveDate,
    pub description: String,
    /// Derived on read: `current_amount >= target_amount`
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSavingsGoal {
    pub name: String,
    pub target_amount: f64,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

/// Editable goal details; progress is updated separately
pub type SavingsGoalUpdate = NewSavingsGoal;

pub const DEFAULT_CURRENCY: &str = "₹";
pub const DEFAULT_VIEW: &str = "dashboard";

/// Per-user display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub id: i64,
    pub user_id: String,
    pub dark_mode: bool,
    pub currency: String,
    pub default_view: String,
}

/// Partial preferences patch; `None` leaves the stored value alone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    pub dark_mode: Option<bool>,
    pub currency: Option<String>,
    pub default_view: Option<String>,
}

/// Income/expense totals for a period plus a breakdown
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub income: f64,
    pub expenses: f64,
    /// `income - expenses`
    pub balance: f64,
    pub transaction_count: usize,
    pub breakdown: Breakdown,
}

/// Monthly summaries break down expenses by category; yearly by month;
/// all-time by year (newest first)
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Breakdown {
    ByCategory(Vec<CategoryTotal>),
    ByMonth(Vec<PeriodTotal>),
    ByYear(Vec<PeriodTotal>),
}

/// Sum of transactions for one category id
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category_id: i64,
    /// None when the category has been deleted
    pub category: Option<Category>,
    pub amount: f64,
    pub transaction_count: usize,
    /// Share of the grouped total, 0-100
    pub percentage: f64,
}

/// Totals for one sub-period (`YYYY-MM` or `YYYY`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub period: String,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub transaction_count: usize,
}
