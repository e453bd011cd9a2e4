//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
    static_dir: Option<&Path>,
    origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Tally web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    // API keys from environment (comma-separated key=user pairs)
    let api_keys = tally_server::parse_api_keys(&std::env::var("TALLY_API_KEYS").unwrap_or_default());

    if no_auth {
        println!();
        println!(
            "   ⚠️  Authentication DISABLED - every request acts as '{}'",
            tally_server::LOCAL_DEV_USER
        );
    } else {
        println!("   🔒 Authentication: Cloudflare Access (header)");
        if !api_keys.is_empty() {
            println!(
                "   🔑 API keys: {} configured (TALLY_API_KEYS)",
                api_keys.len()
            );
        }
    }
    if !origins.is_empty() {
        println!("   🌐 CORS origins: {}", origins.join(", "));
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let config = tally_server::ServerConfig {
        require_auth: !no_auth,
        allowed_origins: origins,
        api_keys,
    };

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("static_dir path must be valid UTF-8"))
        .transpose()?;
    tally_server::serve_with_config(db, host, port, static_dir_str, config).await?;

    Ok(())
}
