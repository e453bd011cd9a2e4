//! Summary and spending report implementations

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::models::{Breakdown, CategoryTotal, PeriodTotal, TransactionType};
use tally_core::{SummaryPeriod, Tracker};

use super::{print_json, require_user, truncate};

fn print_category_totals(totals: &[CategoryTotal]) {
    for t in totals {
        let name = t
            .category
            .as_ref()
            .map_or_else(|| "(deleted)".to_string(), |c| format!("{} {}", c.icon, c.name));
        println!(
            "   {:<26} {:>12.2}  {:>5.1}%  ({} tx)",
            truncate(&name, 26),
            t.amount,
            t.percentage,
            t.transaction_count
        );
    }
}

fn print_period_totals(periods: &[PeriodTotal]) {
    println!(
        "   {:<8} {:>12} {:>12} {:>12}",
        "Period", "Income", "Expenses", "Balance"
    );
    for p in periods {
        println!(
            "   {:<8} {:>12.2} {:>12.2} {:>12.2}",
            p.period, p.income, p.expenses, p.balance
        );
    }
}

pub fn cmd_summary(
    tracker: &Tracker,
    user: Option<&str>,
    period: SummaryPeriod,
    json: bool,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let summary = tracker.get_summary(caller, period)?;

    if json {
        return print_json(&summary);
    }

    let title = match period {
        SummaryPeriod::Month(m) => m.to_string(),
        SummaryPeriod::Year(y) => y.to_string(),
        SummaryPeriod::AllTime => "all time".to_string(),
    };

    println!();
    println!("📊 Summary: {}", title);
    println!("   ─────────────────────────────");
    println!("   Income:       {:>12.2}", summary.income);
    println!("   Expenses:     {:>12.2}", summary.expenses);
    println!("   Balance:      {:>12.2}", summary.balance);
    println!("   Transactions: {:>12}", summary.transaction_count);
    println!();

    match &summary.breakdown {
        Breakdown::ByCategory(totals) if !totals.is_empty() => {
            println!("   Expenses by category:");
            print_category_totals(totals);
        }
        Breakdown::ByMonth(periods) | Breakdown::ByYear(periods) if !periods.is_empty() => {
            print_period_totals(periods);
        }
        _ => {}
    }

    Ok(())
}

pub fn cmd_spending(
    tracker: &Tracker,
    user: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    kind: Option<TransactionType>,
    json: bool,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let totals = tracker.get_spending_by_category(caller, from, to, kind)?;

    if json {
        return print_json(&totals);
    }

    if totals.is_empty() {
        println!("Nothing recorded for this range.");
        return Ok(());
    }

    let kind = kind.unwrap_or(TransactionType::Expense);
    let range = match (from, to) {
        (Some(f), Some(t)) => format!("{} to {}", f, t),
        (Some(f), None) => format!("since {}", f),
        (None, Some(t)) => format!("until {}", t),
        (None, None) => "all time".to_string(),
    };

    println!();
    println!("📈 {} by category ({})", kind, range);
    println!("   ─────────────────────────────────────────────");
    print_category_totals(&totals);

    Ok(())
}
