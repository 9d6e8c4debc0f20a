//! CLI administration tool for novel-likes.
//!
//! # Usage
//!
//! ```bash
//! # List entities whose likes_count disagrees with their like rows
//! cargo run --bin admin -- likes audit
//! cargo run --bin admin -- likes audit --kind chapter
//!
//! # Reset drifted counters to the like row count
//! cargo run --bin admin -- likes repair --kind novel -y
//!
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use novel_likes::domain::entities::{CounterDrift, EntityKind};
use novel_likes::domain::repositories::LikeRepository;
use novel_likes::infrastructure::persistence::PgLikeRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing novel-likes.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit and repair like counters
    Likes {
        #[command(subcommand)]
        action: LikesAction,
    },

    /// Show totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LikesAction {
    /// List counters that disagree with their like rows
    Audit {
        /// Only check this kind (novel or chapter)
        #[arg(short, long)]
        kind: Option<EntityKind>,
    },

    /// Reset drifted counters to the like row count
    Repair {
        /// Only repair this kind (novel or chapter)
        #[arg(short, long)]
        kind: Option<EntityKind>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Likes { action } => handle_likes_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn selected_kinds(kind: Option<EntityKind>) -> Vec<EntityKind> {
    match kind {
        Some(kind) => vec![kind],
        None => EntityKind::ALL.to_vec(),
    }
}

async fn handle_likes_action(action: LikesAction, pool: &PgPool) -> Result<()> {
    let repo = PgLikeRepository::new(Arc::new(pool.clone()));

    match action {
        LikesAction::Audit { kind } => audit(&repo, selected_kinds(kind)).await,
        LikesAction::Repair { kind, yes } => repair(&repo, selected_kinds(kind), yes).await,
    }
}

async fn collect_drift(repo: &PgLikeRepository, kinds: &[EntityKind]) -> Result<Vec<CounterDrift>> {
    let mut drift = Vec::new();
    for kind in kinds {
        let found = repo
            .find_counter_drift(*kind)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to audit {} counters: {}", kind, e))?;
        drift.extend(found);
    }
    Ok(drift)
}

fn print_drift(drift: &[CounterDrift]) {
    println!(
        "  {:<8} {:<10} {:>8} {:>8} {:>7}",
        "Kind".bright_white().bold(),
        "ID".bright_white().bold(),
        "Stored".bright_white().bold(),
        "Actual".bright_white().bold(),
        "Delta".bright_white().bold()
    );
    println!("  {}", "-".repeat(45).bright_black());

    for row in drift {
        let delta = format!("{:+}", row.delta());
        println!(
            "  {:<8} {:<10} {:>8} {:>8} {:>7}",
            row.kind.as_str().cyan(),
            row.entity_id,
            row.stored,
            row.actual,
            delta.yellow()
        );
    }
}

/// Lists drifted counters.
///
/// Read-only; safe to run against a live database.
async fn audit(repo: &PgLikeRepository, kinds: Vec<EntityKind>) -> Result<()> {
    println!("{}", "Like counter audit".bright_blue().bold());
    println!();

    let drift = collect_drift(repo, &kinds).await?;

    if drift.is_empty() {
        println!("{}", "  All counters match their like rows".green());
        println!();
        return Ok(());
    }

    print_drift(&drift);
    println!();
    println!(
        "  Drifted: {}",
        drift.len().to_string().bright_red().bold()
    );
    println!(
        "  Fix with: {} admin likes repair",
        "cargo run --bin".bright_cyan()
    );
    println!();

    Ok(())
}

/// Resets drifted counters after confirmation.
async fn repair(repo: &PgLikeRepository, kinds: Vec<EntityKind>, skip_confirm: bool) -> Result<()> {
    println!("{}", "Like counter repair".bright_blue().bold());
    println!();

    let drift = collect_drift(repo, &kinds).await?;

    if drift.is_empty() {
        println!("{}", "  Nothing to repair".green());
        println!();
        return Ok(());
    }

    print_drift(&drift);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Reset {} counter(s)?", drift.len()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let mut fixed = 0;
    for kind in &kinds {
        fixed += repo
            .repair_counters(*kind)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to repair {} counters: {}", kind, e))?;
    }

    println!();
    println!(
        "{} {}",
        "Repaired counters:".green().bold(),
        fixed.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays totals for novels, chapters, users and likes.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let rows = [
        ("Novels", "SELECT COUNT(*) FROM novels"),
        ("Chapters", "SELECT COUNT(*) FROM chapters"),
        ("Users", "SELECT COUNT(*) FROM users"),
        ("Novel likes", "SELECT COUNT(*) FROM novel_likes"),
        ("Chapter likes", "SELECT COUNT(*) FROM chapter_likes"),
    ];

    for (label, sql) in rows {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
        println!(
            "  {:<14} {}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
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
