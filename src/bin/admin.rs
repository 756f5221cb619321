//! CLI administration tool for users-api.
//!
//! Manages user records and checks the database directly, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List users (first page, 10 per page)
//! cargo run --bin admin -- user list
//!
//! # Create a user interactively
//! cargo run --bin admin -- user create
//!
//! # Delete a user
//! cargo run --bin admin -- user delete 5f0c1e9a-2b7d-4c1e-9a57-2c3d4e5f6a7b
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use users_api::api::dto::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use users_api::api::dto::user::CreateUserDto;
use users_api::error::field_errors;
use users_api::prelude::*;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// CLI tool for managing users-api.
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

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List users one page at a time
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Users per page (at most 20)
        #[arg(short = 's', long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },

    /// Create a new user
    Create {
        /// Login (letters and digits)
        #[arg(short, long)]
        login: Option<String>,

        /// First name
        #[arg(short, long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'n', long)]
        last_name: Option<String>,
    },

    /// Delete a user by id
    Delete {
        /// User id
        id: Uuid,

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
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
    let service = UserService::new(repository);

    match action {
        UserAction::List { page, page_size } => list_users(&service, page, page_size).await?,
        UserAction::Create {
            login,
            first_name,
            last_name,
        } => create_user(&service, login, first_name, last_name).await?,
        UserAction::Delete { id, yes } => delete_user(&service, id, yes).await?,
    }

    Ok(())
}

/// Prints one page of users as a table.
///
/// ```text
/// Users (page 1 of 3, 25 total)
///
///   ID                                    Login                First name      Last name
///   ──────────────────────────────────────────────────────────────────────────────────────
///   5f0c1e9a-2b7d-4c1e-9a57-2c3d4e5f6a7b  johndoe375           John            Doe
/// ```
async fn list_users(service: &UserService, page: u32, page_size: u32) -> Result<()> {
    let page_number = page.max(1);
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);

    let page = service
        .list_users(page_number, page_size)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    println!(
        "{}",
        format!(
            "Users (page {} of {}, {} total)",
            page.current_page,
            page.total_pages(),
            page.total_count
        )
        .bright_blue()
        .bold()
    );
    println!();

    if page.items.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<37} {:<20} {:<15} {:<15}",
        "ID".bright_white().bold(),
        "Login".bright_white().bold(),
        "First name".bright_white().bold(),
        "Last name".bright_white().bold()
    );
    println!("  {}", "─".repeat(88).bright_black());

    for user in &page.items {
        println!(
            "  {:<37} {:<20} {:<15} {}",
            user.id.to_string().bright_black(),
            user.login.cyan(),
            user.first_name,
            user.last_name
        );
    }

    println!();
    if page.has_next() {
        println!(
            "  Next page: {} admin user list --page {} --page-size {}",
            "cargo run --bin".bright_cyan(),
            page.current_page + 1,
            page.page_size
        );
        println!();
    }

    Ok(())
}

/// Creates a user, prompting for any field not given on the command line.
///
/// Input is validated with the same rules as `POST /api/users`.
async fn create_user(
    service: &UserService,
    login: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<()> {
    println!("{}", "Create User".bright_blue().bold());
    println!();

    let dto = CreateUserDto {
        login: prompt_if_missing(login, "Login")?,
        first_name: prompt_if_missing(first_name, "First name")?,
        last_name: prompt_if_missing(last_name, "Last name")?,
    };

    if let Err(errors) = dto.validate() {
        println!("{}", "Invalid user:".red().bold());
        if let Some(fields) = field_errors(&errors).as_object() {
            for (field, messages) in fields {
                for message in messages.as_array().into_iter().flatten() {
                    println!(
                        "  {}: {}",
                        field.yellow(),
                        message.as_str().unwrap_or_default()
                    );
                }
            }
        }
        anyhow::bail!("Validation failed");
    }

    let user = service
        .create_user(dto.into())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "User created successfully!".green().bold());
    println!("  ID:    {}", user.id.to_string().bright_yellow());
    println!("  Login: {}", user.login.cyan());
    println!();

    Ok(())
}

/// Deletes a user after confirmation (default: No).
async fn delete_user(service: &UserService, id: Uuid, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete User".bright_blue().bold());
    println!();

    let user = service
        .get_user(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to find user: {}", e))?;

    println!("  Login: {}", user.login.cyan());
    println!("  Name:  {} {}", user.first_name, user.last_name);
    println!("  ID:    {}", user.id.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this user?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_user(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e))?;

    println!();
    println!("{}", "User deleted successfully!".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await
                .context("Failed to count users (have migrations been applied?)")?;

            println!("{}", "Database connection OK".green().bold());
            println!(
                "  Users: {}",
                users_count.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}
