//! CLI administration tool for crud-api.
//!
//! Provides commands for managing users and their API tokens, and for
//! performing database checks without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for anything not given)
//! cargo run --bin admin -- user create --email admin@example.com
//!
//! # List users
//! cargo run --bin admin -- user list
//!
//! # List tokens, optionally for one user
//! cargo run --bin admin -- token list --email admin@example.com
//!
//! # Revoke every active token of a user
//! cargo run --bin admin -- token revoke-all admin@example.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components: PostgreSQL connection
//!
//! # Features
//!
//! - **User Management**: Create and list users (Argon2-hashed passwords)
//! - **Token Management**: List tokens and revoke all tokens of a user
//! - **Database Tools**: Connection checks and info queries
//! - **Interactive Prompts**: User-friendly CLI with confirmation dialogs
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use crud_api::config::Config;
use crud_api::domain::entities::NewUser;
use crud_api::domain::repositories::{TokenRepository, UserRepository};
use crud_api::infrastructure::persistence::{PgTokenRepository, PgUserRepository};
use crud_api::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;
use validator::ValidateEmail;

/// CLI tool for managing crud-api.
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
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Login email
        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted with confirmation if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List all users
    List,
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// List tokens
    List {
        /// Only tokens of the user with this email
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Revoke every active token of a user
    RevokeAll {
        /// Email of the user
        email: String,
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
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create {
            name,
            email,
            password,
        } => create_user(repo, name, email, password).await?,
        UserAction::List => list_users(repo).await?,
    }

    Ok(())
}

/// Creates a user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for name and email (or use provided)
/// 2. Prompt for password twice (or use provided)
/// 3. Hash password with Argon2
/// 4. Store in database
async fn create_user(
    repo: Arc<PgUserRepository>,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Name")
            .with_initial_text("Admin")
            .interact_text()?,
    };

    let email: String = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let email = email.trim().to_string();

    if !email.validate_email() {
        anyhow::bail!("'{email}' is not a valid email address");
    }

    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }

    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let user = repo
        .create(NewUser {
            name,
            email,
            password_hash,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID:    {}", user.id.to_string().bright_black());
    println!("  Name:  {}", user.name.cyan());
    println!("  Email: {}", user.email.cyan());
    println!();
    println!("{}", "Log in with:".bright_white());
    println!(
        "  curl -X POST http://localhost:3000/auth/login -H 'Content-Type: application/json' -d '{{\"email\":\"{}\",\"password\":\"...\"}}'",
        user.email.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Name                 Email                          Created
///   ──────────────────────────────────────────────────────────────────────────
///   1   Admin                admin@example.com              2024-01-15 10:30
/// ```
async fn list_users(repo: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<20}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<3} {:<20} {:<30} {}",
            user.id.to_string().bright_black(),
            user.name.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let tokens = Arc::new(PgTokenRepository::new(pool));

    match action {
        TokenAction::List { email } => list_tokens(users, tokens, email).await?,
        TokenAction::RevokeAll { email } => revoke_all_tokens(users, tokens, email).await?,
    }

    Ok(())
}

/// Lists tokens with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 API Tokens
///
///   ID  User  Name             Created              Last used            Status
///   ──────────────────────────────────────────────────────────────────────────
///   1   1     auth_token       2024-01-15 10:30     2024-01-15 11:02     ACTIVE
///   2   1     auth_token       2024-01-16 14:20     never                REVOKED
/// ```
async fn list_tokens(
    users: Arc<PgUserRepository>,
    tokens: Arc<PgTokenRepository>,
    email: Option<String>,
) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let user_id = match email {
        Some(email) => Some(find_user_id(&users, &email).await?),
        None => None,
    };

    let tokens = tokens
        .list_tokens(user_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        return Ok(());
    }

    println!(
        "  {:<3} {:<5} {:<16} {:<20} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for token in &tokens {
        let status = if token.is_active() {
            "ACTIVE".green()
        } else {
            "REVOKED".red()
        };

        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<3} {:<5} {:<16} {:<20} {:<20} {}",
            token.id.to_string().bright_black(),
            token.user_id.to_string().bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", tokens.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Revokes every active token of a user with confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No)
/// - Already revoked tokens are left untouched
async fn revoke_all_tokens(
    users: Arc<PgUserRepository>,
    tokens: Arc<PgTokenRepository>,
    email: String,
) -> Result<()> {
    println!("{}", "🔒 Revoke API Tokens".bright_blue().bold());
    println!();

    let user_id = find_user_id(&users, &email).await?;

    println!("  User: {}", email.cyan());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke every active token of this user?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let revoked = tokens
        .revoke_all_for_user(user_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke tokens: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Tokens revoked:".green().bold(),
        revoked.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn find_user_id(users: &PgUserRepository, email: &str) -> Result<i64> {
    let user = users
        .find_by_email(email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No user with email '{email}'"))?;

    Ok(user.id)
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

            for table in [
                "users",
                "members",
                "countries",
                "projects",
                "services",
            ] {
                let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(pool)
                    .await?;
                println!(
                    "  {:<14} {}",
                    format!("{table}:"),
                    count.to_string().bright_green().bold()
                );
            }

            let active_tokens: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
                    .fetch_one(pool)
                    .await?;
            println!(
                "  {:<14} {}",
                "active tokens:",
                active_tokens.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
