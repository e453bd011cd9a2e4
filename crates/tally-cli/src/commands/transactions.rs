//! Transaction command implementations

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::models::{
    NewTransaction, Recurrence, RecurringFrequency, TransactionFilter, TransactionType,
    TransactionUpdate, TransactionWithCategory,
};
use tally_core::Tracker;

use super::{colored_amount, print_json, require_user, truncate};

/// Arguments for `tally transactions add`
pub struct NewTransactionArgs {
    pub amount: f64,
    pub kind: TransactionType,
    pub category: i64,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub recurring: Option<RecurringFrequency>,
    pub until: Option<NaiveDate>,
}

fn print_transactions(title: &str, transactions: &[TransactionWithCategory]) {
    println!();
    println!("📝 {}", title);
    println!("   ─────────────────────────────────────────────────────────────");

    for t in transactions {
        let tx = &t.transaction;
        let category = t
            .category
            .as_ref()
            .map_or_else(|| "(deleted)".to_string(), |c| c.name.clone());
        println!(
            "   [{:>5}] {} │ {:>12} │ {:<18} │ {}{}",
            tx.id,
            tx.date,
            colored_amount(tx.amount, tx.transaction_type == TransactionType::Income),
            truncate(&category, 18),
            truncate(&tx.description, 30),
            tx.recurrence
                .map(|r| format!(" ↻ {}", r.frequency))
                .unwrap_or_default()
        );
    }
}

pub fn cmd_transactions_list(
    tracker: &Tracker,
    user: Option<&str>,
    filter: &TransactionFilter,
    json: bool,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let transactions = tracker.get_transactions(caller, filter)?;

    if json {
        return print_json(&transactions);
    }

    if transactions.is_empty() {
        println!("No transactions match.");
        return Ok(());
    }

    print_transactions(&format!("Transactions ({})", transactions.len()), &transactions);
    Ok(())
}

pub fn cmd_transactions_recent(
    tracker: &Tracker,
    user: Option<&str>,
    limit: usize,
    json: bool,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let transactions = tracker.get_recent_transactions(caller, Some(limit))?;

    if json {
        return print_json(&transactions);
    }

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  tally transactions add 12.50 --type expense --category <id>");
        return Ok(());
    }

    print_transactions("Recent Transactions", &transactions);
    Ok(())
}

pub fn cmd_transactions_add(
    tracker: &Tracker,
    user: Option<&str>,
    args: NewTransactionArgs,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let new = NewTransaction {
        amount: args.amount,
        transaction_type: args.kind,
        category_id: args.category,
        date: args.date.unwrap_or_else(|| tracker.today()),
        description: args.description,
        recurrence: args.recurring.map(|frequency| Recurrence {
            frequency,
            end_date: args.until,
        }),
    };

    let id = tracker.create_transaction(caller, &new)?;

    println!(
        "✅ Recorded {} of {:.2} on {} (id {})",
        new.transaction_type, new.amount, new.date, id
    );
    Ok(())
}

pub fn cmd_transactions_update(
    tracker: &Tracker,
    user: Option<&str>,
    id: i64,
    amount: Option<f64>,
    category: Option<i64>,
    date: Option<NaiveDate>,
    description: Option<String>,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let current = tracker.get_transaction(caller, id)?.transaction;

    let update = TransactionUpdate {
        amount: amount.unwrap_or(current.amount),
        category_id: category.unwrap_or(current.category_id),
        date: date.unwrap_or(current.date),
        description: description.unwrap_or(current.description),
    };
    tracker.update_transaction(caller, id, &update)?;

    println!(
        "✅ Updated transaction {}: {:.2} on {}",
        id, update.amount, update.date
    );
    Ok(())
}

pub fn cmd_transactions_delete(tracker: &Tracker, user: Option<&str>, id: i64) -> Result<()> {
    let caller = Some(require_user(user)?);
    tracker.delete_transaction(caller, id)?;

    println!("✅ Deleted transaction {}", id);
    Ok(())
}
