//! CLI administration tool for url-masker.
//!
//! Provides commands for inspecting and invalidating masked links, viewing
//! statistics, and performing database operations without requiring HTTP API
//! access.
//!
//! # Usage
//!
//! ```bash
//! # Show redirect statistics for a link
//! cargo run --bin admin -- link stats 42
//!
//! # Invalidate a masked link
//! cargo run --bin admin -- link invalidate "https://mask.ly/AbCd1234"
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_USER`/`DB_PASSWORD`/`DB_NAME`): PostgreSQL connection
//! - `MASKED_URL` (optional): masked link prefix, not needed by any command here

use url_masker::application::services::LinkService;
use url_masker::config::{Config, mask_connection_string};
use url_masker::infrastructure::persistence::PgLinkRepository;
use url_masker::infrastructure::security::Argon2PasswordHasher;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-masker.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect or invalidate masked links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show a link and its redirect count
    Stats {
        /// Link ID
        id: i64,
    },

    /// Invalidate a masked link
    Invalidate {
        /// Full masked link (e.g., "https://mask.ly/AbCd1234")
        link: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let mask_prefix = std::env::var("MASKED_URL").unwrap_or_default();
    let service = LinkService::new(
        repository,
        Arc::new(Argon2PasswordHasher::new()),
        mask_prefix,
    );

    match action {
        LinkAction::Stats { id } => show_link(&service, id).await?,
        LinkAction::Invalidate { link, yes } => invalidate_link(&service, link, yes).await?,
    }

    Ok(())
}

/// Prints a single link with its validity and redirect count.
async fn show_link(service: &LinkService, id: i64) -> Result<()> {
    println!("{}", "🔗 Link".bright_blue().bold());
    println!();

    let link = service
        .statistics(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let status = if link.is_valid {
        "VALID".green()
    } else {
        "INVALID".red()
    };

    println!("  ID:         {}", link.id.to_string().bright_black());
    println!("  Link:       {}", link.link.cyan());
    println!("  Target:     {}", link.target.bright_white());
    println!("  Status:     {}", status);
    println!(
        "  Protected:  {}",
        if link.is_protected() { "yes" } else { "no" }
    );
    println!(
        "  Redirects:  {}",
        link.redirects_count.to_string().bright_green().bold()
    );
    println!(
        "  Created:    {}",
        link.created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    if let Some(expiration) = link.expiration_date {
        println!(
            "  Expires:    {}",
            expiration.format("%Y-%m-%d %H:%M").to_string().yellow()
        );
    }
    println!();

    Ok(())
}

/// Invalidates a masked link with confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Invalidating an already invalid link is a no-op
async fn invalidate_link(service: &LinkService, link: String, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔒 Invalidate Link".bright_blue().bold());
    println!();
    println!("  Link: {}", link.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Invalidate this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .invalidate_link(&link)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to invalidate link: {}", e))?;

    println!();
    println!("{}", "✅ Link invalidated".green().bold());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of links
/// - Valid and invalidated links
/// - Total number of redirects
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (total, valid, redirects): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*),
            COUNT(*) FILTER (WHERE is_valid),
            COALESCE(SUM(redirects_count), 0)::BIGINT
        FROM links
        "#,
    )
    .fetch_one(pool)
    .await?;

    println!("  Links:       {}", total.to_string().bright_green().bold());
    println!("  Valid:       {}", valid.to_string().bright_green().bold());
    println!(
        "  Invalidated: {}",
        (total - valid).to_string().bright_red().bold()
    );
    println!(
        "  Redirects:   {}",
        redirects.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
