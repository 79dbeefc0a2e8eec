//! CLI administration tool for qrlink.
//!
//! Inspects stored short links and QR codes and cleans up the content
//! directory without going through the HTTP service.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Look up a short link or QR code
//! cargo run --bin admin -- link show aB3xY9
//! cargo run --bin admin -- qr show 67e55044-10b1-426f-9247-bb680e5fe0c8
//!
//! # Delete images that have no database record
//! cargo run --bin admin -- qr prune-orphans
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection string
//! - `DATA_DIR`: QR content directory (default: `data`)

use qrlink::config::{self, Config};
use qrlink::domain::entities::{QrCode, ShortLink};
use qrlink::domain::repositories::{QrCodeRepository, ShortLinkRepository};
use qrlink::infrastructure::persistence::{PgQrCodeRepository, PgShortLinkRepository};
use qrlink::infrastructure::storage::QrImageStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing qrlink.
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
    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Inspect short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Inspect and clean up QR codes
    Qr {
        #[command(subcommand)]
        action: QrAction,
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

#[derive(Subcommand)]
enum LinkAction {
    /// Show the record behind a short link
    Show {
        /// Short link code, e.g. "aB3xY9"
        short_link: String,
    },
}

#[derive(Subcommand)]
enum QrAction {
    /// Show the record behind a QR code id
    Show {
        /// QR code id (UUID)
        qr_id: Uuid,
    },

    /// Delete image files that have no database record
    PruneOrphans {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::Stats => handle_stats(&pool, &config).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Qr { action } => handle_qr_action(action, &pool, &config).await?,
    }

    Ok(())
}

/// Displays record counts and the number of stored images.
async fn handle_stats(pool: &Arc<PgPool>, config: &Config) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count = PgShortLinkRepository::new(pool.clone())
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count short links: {}", e))?;

    let qr_count = PgQrCodeRepository::new(pool.clone())
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count QR codes: {}", e))?;

    let images = QrImageStore::new(config.data_dir.clone());
    let image_count = if images.is_available().await {
        images
            .list_image_ids()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to list images: {}", e))?
            .len()
            .to_string()
    } else {
        "directory missing".to_string()
    };

    println!(
        "  Short links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  QR codes:     {}",
        qr_count.to_string().bright_green().bold()
    );
    println!("  Image files:  {}", image_count.bright_green().bold());
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

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

async fn handle_link_action(action: LinkAction, pool: &Arc<PgPool>) -> Result<()> {
    let repo = PgShortLinkRepository::new(pool.clone());

    match action {
        LinkAction::Show { short_link } => {
            let link = repo
                .find_by_short_link(&short_link)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Short link not found")?;

            print_short_link(&link);
        }
    }

    Ok(())
}

async fn handle_qr_action(action: QrAction, pool: &Arc<PgPool>, config: &Config) -> Result<()> {
    let repo = PgQrCodeRepository::new(pool.clone());
    let images = QrImageStore::new(config.data_dir.clone());

    match action {
        QrAction::Show { qr_id } => {
            let qr = repo
                .find_by_id(qr_id)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("QR code not found")?;

            print_qr_code(&qr, &images).await;
        }
        QrAction::PruneOrphans { yes } => prune_orphans(&repo, &images, yes).await?,
    }

    Ok(())
}

fn print_short_link(link: &ShortLink) {
    println!("{}", "🔗 Short Link".bright_blue().bold());
    println!();
    println!("  Code:       {}", link.short_link.cyan());
    println!("  Long URL:   {}", link.long_url.bright_white());
    println!(
        "  Created:    {}",
        link.create_time
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    println!("  IP:         {}", link.ip);
    println!(
        "  User-Agent: {}",
        link.user_agent.as_deref().unwrap_or("-").bright_black()
    );
    println!();
}

async fn print_qr_code(qr: &QrCode, images: &QrImageStore) {
    let path = images.image_path(qr.qr_id);
    let file_status = if tokio::fs::metadata(&path).await.is_ok() {
        "present".green()
    } else {
        "MISSING".red()
    };

    println!("{}", "🔳 QR Code".bright_blue().bold());
    println!();
    println!("  Id:         {}", qr.qr_id.to_string().cyan());
    println!("  Long URL:   {}", qr.long_url.bright_white());
    println!(
        "  Created:    {}",
        qr.create_time
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    println!("  IP:         {}", qr.ip);
    println!(
        "  User-Agent: {}",
        qr.user_agent.as_deref().unwrap_or("-").bright_black()
    );
    println!("  File:       {} ({})", path.display(), file_status);
    println!();
}

/// Deletes images whose id has no record in `qr_codes`.
///
/// Requires confirmation (default: No) unless `--yes` is given.
async fn prune_orphans(repo: &PgQrCodeRepository, images: &QrImageStore, yes: bool) -> Result<()> {
    println!("{}", "🧹 Prune Orphaned QR Images".bright_blue().bold());
    println!();

    let ids = images
        .list_image_ids()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list images: {}", e))?;

    let mut orphans = Vec::new();
    for id in ids {
        let record = repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
        if record.is_none() {
            orphans.push(id);
        }
    }

    if orphans.is_empty() {
        println!("{}", "  No orphaned images found".green());
        return Ok(());
    }

    for id in &orphans {
        println!("  {}", images.image_path(*id).display().to_string().yellow());
    }
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} file(s)?", orphans.len()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    for id in &orphans {
        images
            .remove_image(*id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to remove {}: {}", id, e))?;
    }

    println!();
    println!(
        "{}",
        format!("✅ Removed {} orphaned image(s)", orphans.len())
            .green()
            .bold()
    );
    println!();

    Ok(())
}
