//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `open_tracker` - Shared utilities to open the database
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{db::Database, Tracker};
use tracing::debug;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    debug!(path = %path_str, encrypted = !no_encrypt, "Opening database");
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn open_tracker(db_path: &Path, no_encrypt: bool) -> Result<Tracker> {
    Ok(Tracker::new(open_db(db_path, no_encrypt)?))
}

/// Fail early with a hint when no identity was given
pub fn require_user(user: Option<&str>) -> Result<&str> {
    user.map(str::trim)
        .filter(|u| !u.is_empty())
        .context("No user given. Pass --user or set TALLY_USER")
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool, seed: bool, user: Option<&str>) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;

    if seed {
        let user = require_user(user)?;
        let tracker = Tracker::new(db);
        let created = tracker
            .initialize_default_categories(Some(user))
            .context("Failed to seed default categories")?;
        if created > 0 {
            println!("   Seeded {} default categories for {}", created, user);
        } else {
            println!("   {} already has categories, nothing seeded", user);
        }
    }

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record a transaction: tally transactions add 12.50 --type expense --category <id>");
    println!("  2. Start web UI: tally serve");

    Ok(())
}
