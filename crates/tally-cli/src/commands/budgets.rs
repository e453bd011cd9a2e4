//! Budget command implementations

use anyhow::Result;
use tally_core::models::SetBudget;
use tally_core::{Month, Tracker};

use super::{print_json, require_user};

pub fn cmd_budgets_list(
    tracker: &Tracker,
    user: Option<&str>,
    month: Option<Month>,
    json: bool,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let month = month.unwrap_or_else(|| Month::of(tracker.today()));
    let budgets = tracker.get_budgets(caller, month)?;

    if json {
        return print_json(&budgets);
    }

    if budgets.is_empty() {
        println!("No budgets for {}. Set one with:", month);
        println!("  tally budgets set 500 --month {}", month);
        return Ok(());
    }

    println!();
    println!("💰 Budgets for {}", month);
    println!("   ─────────────────────────────────────────────────────────────");

    for b in budgets {
        let label = match (&b.category, b.budget.category_id) {
            (_, None) => "Whole month".to_string(),
            (Some(c), Some(_)) => format!("{} {}", c.icon, c.name),
            (None, Some(id)) => format!("(deleted #{})", id),
        };
        let flag = if b.percentage > 100.0 { " ⚠️" } else { "" };
        println!(
            "   [{:>4}] {:<24} {:>10.2} / {:>10.2}  {:>5.1}%{}{}",
            b.budget.id,
            label,
            b.spent,
            b.budget.amount,
            b.percentage,
            if b.is_recurring { " ↻" } else { "" },
            flag
        );
    }

    Ok(())
}

pub fn cmd_budgets_set(
    tracker: &Tracker,
    user: Option<&str>,
    amount: f64,
    month: Option<Month>,
    category: Option<i64>,
    apply_to_future_months: Option<bool>,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let month = month.unwrap_or_else(|| Month::of(tracker.today()));

    let write = tracker.set_budget(
        caller,
        &SetBudget {
            category_id: category,
            amount,
            month,
            apply_to_future_months,
        },
    )?;

    println!(
        "✅ {} budget {} for {}: {:.2}",
        if write.inserted { "Created" } else { "Updated" },
        write.id,
        month,
        amount
    );
    match apply_to_future_months {
        Some(true) => println!(
            "   Copied to {} later months (through December {})",
            write.propagated,
            tracker.horizon_year()
        ),
        Some(false) => println!("   Removed from {} later months", write.propagated),
        None => {}
    }
    Ok(())
}

pub fn cmd_budgets_delete(tracker: &Tracker, user: Option<&str>, id: i64) -> Result<()> {
    let caller = Some(require_user(user)?);
    tracker.delete_budget(caller, id)?;

    println!("✅ Deleted budget {}", id);
    Ok(())
}
