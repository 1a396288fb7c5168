//! Cakestack CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! cake-cli migrate
//!
//! # Seed a demo shop with cakes and toppings
//! cake-cli seed
//! cake-cli seed --shop my-bakery
//!
//! # Create an admin record for an existing identity-provider account
//! cake-cli admin create --uid abc123 --email admin@example.com --shop sweet-treats
//!
//! # Replace an admin's shop assignments
//! cake-cli admin assign --uid abc123 --shop sweet-treats --shop second-shop
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with demo data
//! - `admin create` - Create admin records
//! - `admin assign` - Replace an admin's shop assignments

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cake-cli")]
#[command(author, version, about = "Cakestack CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with a demo shop
    Seed {
        /// Slug of the shop to create
        #[arg(short, long, default_value = "sweet-treats")]
        shop: String,
    },
    /// Manage admin records
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create an admin record for an existing identity-provider account
    Create {
        /// Identity-provider user ID
        #[arg(short, long)]
        uid: String,

        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Shop slugs to assign (repeatable)
        #[arg(short, long)]
        shop: Vec<String>,
    },
    /// Replace an admin's shop assignments
    Assign {
        /// Identity-provider user ID
        #[arg(short, long)]
        uid: String,

        /// Shop slugs to assign (repeatable)
        #[arg(short, long)]
        shop: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { shop } => commands::seed::run(&shop).await?,
        Commands::Admin { action } => match action {
            AdminAction::Create { uid, email, shop } => {
                commands::admin::create(&uid, &email, &shop).await?;
            }
            AdminAction::Assign { uid, shop } => {
                commands::admin::assign(&uid, &shop).await?;
            }
        },
    }
    Ok(())
}
