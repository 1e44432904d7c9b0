//! CLI administration tool for linkgate.
//!
//! Manages links and the database directly, without going through the web
//! admin page. Uses the same storage selection as the server: PostgreSQL when
//! `POSTGRES_URL` / `DATABASE_URL` is set, the SQLite file otherwise.
//!
//! # Usage
//!
//! ```bash
//! # List links, most recent first
//! cargo run --bin admin -- links list
//!
//! # Create a link (alias generated when omitted)
//! cargo run --bin admin -- links create example.com --alias docs
//!
//! # Delete a link by id
//! cargo run --bin admin -- links delete 42
//!
//! # Check database connection / create the links table
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db setup
//! ```

use linkgate::application::services::LinkService;
use linkgate::config;
use linkgate::error::AppError;
use linkgate::infrastructure::persistence::{self, SqlLinkRepository, Store};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;

/// CLI tool for managing linkgate.
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
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links
    List,

    /// Create a new link
    Create {
        /// Destination URL (prompted if omitted)
        url: Option<String>,

        /// Custom alias (generated if omitted)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Delete a link
    Delete {
        /// Link id
        id: i64,

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

    /// Create the links table if missing
    Setup,
}

type CliLinkService = LinkService<SqlLinkRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let store = persistence::connect(&config)
        .await
        .context("Failed to open database")?;

    match cli.command {
        Commands::Links { action } => {
            store
                .ensure_schema()
                .await
                .context("Failed to create links table")?;
            let service = LinkService::new(Arc::new(SqlLinkRepository::new(store.clone())));
            handle_link_action(action, &service).await?
        }
        Commands::Db { action } => handle_db_action(action, store.as_ref()).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, service: &CliLinkService) -> Result<()> {
    match action {
        LinkAction::List => list_links(service).await,
        LinkAction::Create { url, alias } => create_link(service, url, alias).await,
        LinkAction::Delete { id, yes } => delete_link(service, id, yes).await,
    }
}

/// Lists all links with their click counters.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   ID   Alias        Clicks   Created            URL
///   ──────────────────────────────────────────────────────────────────────
///   2    docs         14       2024-01-16 14:20   https://docs.rs
///   1    Xy3_k9       0        2024-01-15 10:30   https://example.com
/// ```
async fn list_links(service: &CliLinkService) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<12} {:<8} {:<18} {}",
        "ID".bright_white().bold(),
        "Alias".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for link in &links {
        println!(
            "  {:<4} {:<12} {:<8} {:<18} {}",
            link.id.to_string().bright_black(),
            link.alias.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.url
        );
    }

    let total_clicks: i64 = links.iter().map(|link| link.clicks).sum();

    println!();
    println!(
        "  Total: {} links, {} clicks",
        links.len().to_string().bright_white().bold(),
        total_clicks.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Creates a link, prompting for the URL when it was not given.
async fn create_link(
    service: &CliLinkService,
    url: Option<String>,
    alias: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Destination URL").interact_text()?,
    };

    let link = match service.create_link(&url, alias.as_deref()).await {
        Ok(link) => link,
        Err(AppError::Conflict { .. }) => {
            println!("{}", "⚠️  That alias is already taken".yellow());
            return Ok(());
        }
        Err(e) => anyhow::bail!("Failed to create link: {}", e),
    };

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!("  ID:    {}", link.id.to_string().bright_black());
    println!("  Alias: {}", link.alias.bright_yellow().bold());
    println!("  URL:   {}", link.url.cyan());
    println!();

    Ok(())
}

/// Deletes a link by id with confirmation prompt (default: No).
async fn delete_link(service: &CliLinkService, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete link #{id}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .delete_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if deleted {
        println!("{}", "✅ Link deleted".green().bold());
    } else {
        println!("{}", "⚠️  No link with that id".yellow());
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, store: &dyn Store) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            store.ping().await?;

            println!(
                "{} ({})",
                "✅ Database connection OK".green().bold(),
                store.backend().as_str().bright_white()
            );
        }
        DbAction::Setup => {
            println!("{}", "🛠️  Creating links table...".bright_blue());

            store.ensure_schema().await?;

            println!("{}", "✅ Table 'links' created or verified".green().bold());
        }
    }

    Ok(())
}
