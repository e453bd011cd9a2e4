//! Savings goal command implementations

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::models::{NewSavingsGoal, SavingsGoalUpdate};
use tally_core::Tracker;

use super::{print_json, require_user};

pub fn cmd_goals_list(tracker: &Tracker, user: Option<&str>, json: bool) -> Result<()> {
    let caller = Some(require_user(user)?);
    let goals = tracker.get_savings_goals(caller)?;

    if json {
        return print_json(&goals);
    }

    if goals.is_empty() {
        println!("No savings goals yet. Add one with:");
        println!("  tally goals add \"Emergency fund\" --target 1000 --date 2026-12-31");
        return Ok(());
    }

    println!();
    println!("🎯 Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    for g in goals {
        let pct = if g.target_amount > 0.0 {
            g.current_amount / g.target_amount * 100.0
        } else {
            0.0
        };
        println!(
            "   [{:>4}] {:<24} {:>10.2} / {:>10.2} ({:>5.1}%) by {}{}",
            g.id,
            g.name,
            g.current_amount,
            g.target_amount,
            pct,
            g.target_date,
            if g.is_completed { " ✅" } else { "" }
        );
    }

    Ok(())
}

pub fn cmd_goals_add(
    tracker: &Tracker,
    user: Option<&str>,
    name: &str,
    target: f64,
    date: NaiveDate,
    description: &str,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let id = tracker.create_savings_goal(
        caller,
        &NewSavingsGoal {
            name: name.to_string(),
            target_amount: target,
            target_date: date,
            description: description.to_string(),
        },
    )?;

    println!("✅ Created goal '{}' (id {}): {:.2} by {}", name, id, target, date);
    Ok(())
}

pub fn cmd_goals_update(
    tracker: &Tracker,
    user: Option<&str>,
    id: i64,
    name: Option<String>,
    target: Option<f64>,
    date: Option<NaiveDate>,
    description: Option<String>,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let current = tracker.get_savings_goal(caller, id)?;

    let update = SavingsGoalUpdate {
        name: name.unwrap_or(current.name),
        target_amount: target.unwrap_or(current.target_amount),
        target_date: date.unwrap_or(current.target_date),
        description: description.unwrap_or(current.description),
    };
    let goal = tracker.update_savings_goal(caller, id, &update)?;

    println!(
        "✅ Updated goal {}: {} ({:.2} by {})",
        goal.id, goal.name, goal.target_amount, goal.target_date
    );
    Ok(())
}

pub fn cmd_goals_progress(tracker: &Tracker, user: Option<&str>, id: i64, amount: f64) -> Result<()> {
    let caller = Some(require_user(user)?);
    let goal = tracker.update_savings_goal_progress(caller, id, amount)?;

    println!(
        "✅ {}: {:.2} of {:.2} saved",
        goal.name, goal.current_amount, goal.target_amount
    );
    if goal.is_completed {
        println!("   🎉 Goal reached!");
    }
    Ok(())
}

pub fn cmd_goals_delete(tracker: &Tracker, user: Option<&str>, id: i64) -> Result<()> {
    let caller = Some(require_user(user)?);
    tracker.delete_savings_goal(caller, id)?;

    println!("✅ Deleted goal {}", id);
    Ok(())
}
