//! CLI administration tool for shitpost-shortener.
//!
//! Works directly against the PostgreSQL store, without the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- shorten https://example.com/a/b
//!
//! # Show the code already assigned to a URL, without creating one
//! cargo run --bin admin -- lookup https://example.com/a/b
//!
//! # Count stored links
//! cargo run --bin admin -- stats
//!
//! # Database tools
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db info
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! Loaded the same way as the server: `DATABASE_URL` (or its `DB_*` parts),
//! `SERVICE_DOMAIN` and `MAX_CODE_ATTEMPTS` apply here too.

use shitpost_shortener::api::dto::shorten::ShortenRequest;
use shitpost_shortener::application::services::Shortener;
use shitpost_shortener::config::{self, Config};
use shitpost_shortener::domain::policy::SelfReferencePolicy;
use shitpost_shortener::error::ShortenError;
use shitpost_shortener::infrastructure::persistence::PgLinkStore;
use shitpost_shortener::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing shitpost-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL, reusing its existing code if it has one
    Shorten {
        /// The long URL (prompted for if omitted)
        url: Option<String>,
    },

    /// Show the code assigned to a URL without creating one
    Lookup {
        /// The exact long URL
        url: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Shorten { url } => handle_shorten(&pool, &config, url).await?,
        Commands::Lookup { url } => handle_lookup(&pool, &config, &url).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Builds a shortener over the PostgreSQL store, configured like the server's.
fn build_shortener(pool: &PgPool, config: &Config) -> Result<Shortener> {
    let policy =
        SelfReferencePolicy::new(&config.service_domain).context("Invalid SERVICE_DOMAIN")?;
    let store = Arc::new(PgLinkStore::new(Arc::new(pool.clone())));

    Ok(Shortener::new(store, Arc::new(RandomCodeGenerator), policy)
        .with_max_code_attempts(config.max_code_attempts))
}

/// Applies the HTTP endpoint's length rule to a URL entered on the command line.
fn validate_long_url(url: String) -> Result<String> {
    let request = ShortenRequest { url };
    request
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid URL: {}", e))?;

    Ok(request.url)
}

/// Shortens a URL, prompting for it when not given on the command line.
async fn handle_shorten(pool: &PgPool, config: &Config, url: Option<String>) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let long_url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Long URL").interact_text()?,
    };
    let long_url = validate_long_url(long_url)?;

    let shortener = build_shortener(pool, config)?;

    match shortener.shorten(&long_url).await {
        Ok(code) => {
            println!("  URL:  {}", long_url.cyan());
            println!("  Code: {}", code.bright_yellow().bold());
            println!();
        }
        Err(ShortenError::SelfReferential) => {
            println!(
                "{}",
                format!(
                    "❌ Refusing to shorten a URL on {}",
                    shortener.policy().domain()
                )
                .red()
            );
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to shorten URL: {}", e)),
    }

    Ok(())
}

/// Prints the code for a URL, if any.
async fn handle_lookup(pool: &PgPool, config: &Config, url: &str) -> Result<()> {
    let shortener = build_shortener(pool, config)?;

    let link = shortener
        .lookup(url)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    match link {
        Some(link) => {
            println!("  URL:  {}", link.long_url.cyan());
            println!("  Code: {}", link.code.bright_yellow().bold());
        }
        None => println!("{}", "  No link found for this URL".yellow()),
    }

    Ok(())
}

/// Displays the number of stored links.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let store = PgLinkStore::new(Arc::new(pool.clone()));
    let links_count = store
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Links: {}",
        links_count.to_string().bright_green().bold()
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

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠️  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
