//! Category command implementations

use anyhow::{Context, Result};
use tally_core::models::{CategoryType, CategoryUpdate, NewCategory};
use tally_core::Tracker;

use super::{print_json, require_user};

pub fn cmd_categories_list(
    tracker: &Tracker,
    user: Option<&str>,
    kind: Option<CategoryType>,
    json: bool,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let categories = tracker.get_user_categories(caller, kind)?;

    if json {
        return print_json(&categories);
    }

    if categories.is_empty() {
        println!("No categories yet. Create the defaults with:");
        println!("  tally categories seed");
        return Ok(());
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────────");

    for c in categories {
        println!(
            "   [{:>4}] {} {:<24} {:<8}{}",
            c.id,
            c.icon,
            c.name,
            c.category_type,
            if c.is_default { " (default)" } else { "" }
        );
    }

    Ok(())
}

pub fn cmd_categories_add(
    tracker: &Tracker,
    user: Option<&str>,
    name: &str,
    kind: CategoryType,
    color: &str,
    icon: &str,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let id = tracker.create_category(
        caller,
        &NewCategory {
            name: name.to_string(),
            category_type: kind,
            color: color.to_string(),
            icon: icon.to_string(),
        },
    )?;

    println!("✅ Created {} category '{}' (id {})", kind, name.trim(), id);
    Ok(())
}

pub fn cmd_categories_update(
    tracker: &Tracker,
    user: Option<&str>,
    id: i64,
    name: Option<&str>,
    color: Option<&str>,
    icon: Option<&str>,
) -> Result<()> {
    let caller = Some(require_user(user)?);
    let current = tracker.get_category(caller, id)?;

    let update = CategoryUpdate {
        name: name.map_or(current.name, str::to_string),
        color: color.map_or(current.color, str::to_string),
        icon: icon.map_or(current.icon, str::to_string),
    };
    tracker.update_category(caller, id, &update)?;

    println!("✅ Updated category {}: {} {}", id, update.icon, update.name.trim());
    Ok(())
}

pub fn cmd_categories_delete(tracker: &Tracker, user: Option<&str>, id: i64) -> Result<()> {
    let caller = Some(require_user(user)?);
    tracker
        .delete_category(caller, id)
        .with_context(|| format!("Could not delete category {}", id))?;

    println!("✅ Deleted category {}", id);
    println!("   Transactions that used it keep their amounts and show as uncategorized.");
    Ok(())
}

pub fn cmd_categories_seed(tracker: &Tracker, user: Option<&str>) -> Result<()> {
    let caller = Some(require_user(user)?);
    let created = tracker.initialize_default_categories(caller)?;

    if created == 0 {
        println!("Categories already exist, nothing seeded.");
    } else {
        println!("✅ Created {} default categories", created);
    }
    Ok(())
}
