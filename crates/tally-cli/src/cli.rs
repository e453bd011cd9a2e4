//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tally_core::models::{CategoryType, RecurringFrequency, TransactionType};
use tally_core::Month;

/// Tally - Track income, expenses, budgets and savings goals
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Self-hosted personal finance tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set TALLY_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// User identity that owns the data (e.g. an email address)
    #[arg(long, env = "TALLY_USER", global = true)]
    pub user: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init {
        /// Also create the default categories for --user
        #[arg(long)]
        seed: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// Every request acts as the fixed user "local-dev".
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origin (repeatable)
        #[arg(long = "origin")]
        origins: Vec<String>,
    },

    /// Manage categories (list, add, update, delete, seed)
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Manage transactions (list, recent, add, update, delete)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage monthly budgets (list, set, delete)
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Show income/expense summaries
    Summary {
        #[command(subcommand)]
        period: Option<SummaryPeriodArg>,
    },

    /// Show totals per category for a date range
    Spending {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// income or expense (default: expense)
        #[arg(long = "type")]
        kind: Option<TransactionType>,
    },

    /// Manage savings goals (list, add, update, progress, delete)
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Show or change display preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List {
        /// Only income or expense categories
        #[arg(long = "type")]
        kind: Option<CategoryType>,
    },
    /// Add a custom category
    Add {
        /// Category name
        name: String,
        /// income or expense
        #[arg(long = "type")]
        kind: CategoryType,
        #[arg(long, default_value = "#6B7280")]
        color: String,
        #[arg(long, default_value = "📦")]
        icon: String,
    },
    /// Rename or restyle a category (type cannot change)
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete a custom category
    Delete { id: i64 },
    /// Create the default categories if none exist
    Seed,
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions, newest first
    List {
        #[arg(long = "type")]
        kind: Option<TransactionType>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the most recent transactions
    Recent {
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Record a transaction
    Add {
        /// Amount (non-negative)
        amount: f64,
        /// income or expense
        #[arg(long = "type")]
        kind: TransactionType,
        /// Category ID
        #[arg(long)]
        category: i64,
        /// Date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Mark as recurring: daily, weekly or monthly
        #[arg(long)]
        recurring: Option<RecurringFrequency>,
        /// Last date the recurrence applies
        #[arg(long, requires = "recurring")]
        until: Option<NaiveDate>,
    },
    /// Edit a transaction
    Update {
        id: i64,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a transaction
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// Budgets and spending for a month
    List {
        /// Month (YYYY-MM, default current)
        #[arg(long)]
        month: Option<Month>,
    },
    /// Create or update a budget
    Set {
        amount: f64,
        /// Month (YYYY-MM, default current)
        #[arg(long)]
        month: Option<Month>,
        /// Category ID (omit for a whole-month budget)
        #[arg(long)]
        category: Option<i64>,
        /// Copy the amount to every later month through next December
        #[arg(long, conflicts_with = "clear_future")]
        apply_future: bool,
        /// Remove this budget from every later month through next December
        #[arg(long)]
        clear_future: bool,
    },
    /// Delete one budget row
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum SummaryPeriodArg {
    /// One month, broken down by category
    Month {
        /// Month (YYYY-MM, default current)
        month: Option<Month>,
    },
    /// One year, broken down by month
    Year {
        /// Year (default current)
        year: Option<i32>,
    },
    /// Everything, broken down by year
    All,
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List savings goals
    List,
    /// Create a savings goal
    Add {
        name: String,
        #[arg(long)]
        target: f64,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Edit a goal's details
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Set the amount saved so far
    Progress { id: i64, amount: f64 },
    /// Delete a goal
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show preferences
    Show,
    /// Change preferences
    Set {
        #[arg(long)]
        dark_mode: Option<bool>,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        default_view: Option<String>,
    },
}
