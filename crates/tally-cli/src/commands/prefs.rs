//! Preference command implementations

use anyhow::Result;
use tally_core::models::PreferencesUpdate;
use tally_core::Tracker;

use super::{print_json, require_user};

pub fn cmd_prefs_show(tracker: &Tracker, user: Option<&str>, json: bool) -> Result<()> {
    let caller = Some(require_user(user)?);
    let prefs = tracker.get_user_preferences(caller)?;

    if json {
        return print_json(&prefs);
    }

    println!();
    println!("⚙️  Preferences for {}", prefs.user_id);
    println!("   Dark mode:    {}", if prefs.dark_mode { "on" } else { "off" });
    println!("   Currency:     {}", prefs.currency);
    println!("   Default view: {}", prefs.default_view);
    Ok(())
}

pub fn cmd_prefs_set(tracker: &Tracker, user: Option<&str>, update: &PreferencesUpdate) -> Result<()> {
    let caller = Some(require_user(user)?);

    if update.dark_mode.is_none() && update.currency.is_none() && update.default_view.is_none() {
        println!("Nothing to change. Use --dark-mode, --currency or --default-view.");
        return Ok(());
    }

    let prefs = tracker.update_user_preferences(caller, update)?;
    println!(
        "✅ Saved: dark mode {}, currency {}, default view {}",
        if prefs.dark_mode { "on" } else { "off" },
        prefs.currency,
        prefs.default_view
    );
    Ok(())
}
