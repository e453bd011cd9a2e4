//! Tally CLI - Personal finance tracker
//!
//! Usage:
//!   tally init --seed --user me@example.com   Initialize database and categories
//!   tally transactions add 12.50 --type expense --category 5
//!   tally summary month 2025-06               Monthly summary
//!   tally serve --port 3000                   Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use tally_core::SummaryPeriod;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let user = cli.user.as_deref();
    let json = cli.json;

    match cli.command {
        Commands::Init { seed } => commands::cmd_init(&cli.db, cli.no_encrypt, seed, user),
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
            origins,
        } => {
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                no_auth,
                cli.no_encrypt,
                static_dir.as_deref(),
                origins,
            )
            .await
        }
        Commands::Categories { action } => {
            let tracker = commands::open_tracker(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_categories_list(&tracker, user, None, json),
                Some(CategoriesAction::List { kind }) => {
                    commands::cmd_categories_list(&tracker, user, kind, json)
                }
                Some(CategoriesAction::Add {
                    name,
                    kind,
                    color,
                    icon,
                }) => commands::cmd_categories_add(&tracker, user, &name, kind, &color, &icon),
                Some(CategoriesAction::Update {
                    id,
                    name,
                    color,
                    icon,
                }) => commands::cmd_categories_update(
                    &tracker,
                    user,
                    id,
                    name.as_deref(),
                    color.as_deref(),
                    icon.as_deref(),
                ),
                Some(CategoriesAction::Delete { id }) => {
                    commands::cmd_categories_delete(&tracker, user, id)
                }
                Some(CategoriesAction::Seed) => commands::cmd_categories_seed(&tracker, user),
            }
        }
        Commands::Transactions { action } => {
            let tracker = commands::open_tracker(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_transactions_recent(&tracker, user, 10, json),
                Some(TransactionsAction::List {
                    kind,
                    category,
                    from,
                    to,
                    limit,
                }) => {
                    let filter = tally_core::models::TransactionFilter {
                        transaction_type: kind,
                        category_id: category,
                        start_date: from,
                        end_date: to,
                        limit,
                    };
                    commands::cmd_transactions_list(&tracker, user, &filter, json)
                }
                Some(TransactionsAction::Recent { limit }) => {
                    commands::cmd_transactions_recent(&tracker, user, limit, json)
                }
                Some(TransactionsAction::Add {
                    amount,
                    kind,
                    category,
                    date,
                    description,
                    recurring,
                    until,
                }) => commands::cmd_transactions_add(
                    &tracker,
                    user,
                    commands::NewTransactionArgs {
                        amount,
                        kind,
                        category,
                        date,
                        description,
                        recurring,
                        until,
                    },
                ),
                Some(TransactionsAction::Update {
                    id,
                    amount,
                    category,
                    date,
                    description,
                }) => commands::cmd_transactions_update(
                    &tracker,
                    user,
                    id,
                    amount,
                    category,
                    date,
                    description,
                ),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&tracker, user, id)
                }
            }
        }
        Commands::Budgets { action } => {
            let tracker = commands::open_tracker(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_budgets_list(&tracker, user, None, json),
                Some(BudgetsAction::List { month }) => {
                    commands::cmd_budgets_list(&tracker, user, month, json)
                }
                Some(BudgetsAction::Set {
                    amount,
                    month,
                    category,
                    apply_future,
                    clear_future,
                }) => {
                    let future = match (apply_future, clear_future) {
                        (true, _) => Some(true),
                        (false, true) => Some(false),
                        (false, false) => None,
                    };
                    commands::cmd_budgets_set(&tracker, user, amount, month, category, future)
                }
                Some(BudgetsAction::Delete { id }) => {
                    commands::cmd_budgets_delete(&tracker, user, id)
                }
            }
        }
        Commands::Summary { period } => {
            let tracker = commands::open_tracker(&cli.db, cli.no_encrypt)?;
            let today = tracker.today();
            let period = match period {
                None => SummaryPeriod::Month(tally_core::Month::of(today)),
                Some(SummaryPeriodArg::Month { month }) => SummaryPeriod::Month(
                    month.unwrap_or_else(|| tally_core::Month::of(today)),
                ),
                Some(SummaryPeriodArg::Year { year }) => {
                    use chrono::Datelike;
                    SummaryPeriod::Year(year.unwrap_or_else(|| today.year()))
                }
                Some(SummaryPeriodArg::All) => SummaryPeriod::AllTime,
            };
            commands::cmd_summary(&tracker, user, period, json)
        }
        Commands::Spending { from, to, kind } => {
            let tracker = commands::open_tracker(&cli.db, cli.no_encrypt)?;
            commands::cmd_spending(&tracker, user, from, to, kind, json)
        }
        Commands::Goals { action } => {
            let tracker = commands::open_tracker(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(GoalsAction::List) => commands::cmd_goals_list(&tracker, user, json),
                Some(GoalsAction::Add {
                    name,
                    target,
                    date,
                    description,
                }) => commands::cmd_goals_add(&tracker, user, &name, target, date, &description),
                Some(GoalsAction::Update {
                    id,
                    name,
                    target,
                    date,
                    description,
                }) => commands::cmd_goals_update(
                    &tracker,
                    user,
                    id,
                    name,
                    target,
                    date,
                    description,
                ),
                Some(GoalsAction::Progress { id, amount }) => {
                    commands::cmd_goals_progress(&tracker, user, id, amount)
                }
                Some(GoalsAction::Delete { id }) => commands::cmd_goals_delete(&tracker, user, id),
            }
        }
        Commands::Prefs { action } => {
            let tracker = commands::open_tracker(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(PrefsAction::Show) => commands::cmd_prefs_show(&tracker, user, json),
                Some(PrefsAction::Set {
                    dark_mode,
                    currency,
                    default_view,
                }) => {
                    let update = tally_core::models::PreferencesUpdate {
                        dark_mode,
                        currency,
                        default_view,
                    };
                    commands::cmd_prefs_set(&tracker, user, &update)
                }
            }
        }
    }
}
