//! Marketplace CLI - storefront client for the marketplace service.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! marketplace products list
//! marketplace products list -s mouse
//!
//! # Sign in (password read from MARKETPLACE_PASSWORD, or prompted)
//! marketplace login -e mike@example.com
//!
//! # Shop interactively: build a cart and check out
//! marketplace shop
//!
//! # Admin catalog management (requires a persisted admin session)
//! marketplace products add -n Webcam -p 30.00
//! marketplace products remove -i 7
//! ```
//!
//! # Commands
//!
//! - `products` - Browse or manage the catalog
//! - `login` / `register` / `logout` / `whoami` - Session management
//! - `orders` - Show order history
//! - `shop` - Interactive shopping session

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use marketplace_client::{ClientConfig, Storefront};

mod commands;

#[derive(Parser)]
#[command(name = "marketplace")]
#[command(author, version, about = "Marketplace storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse or manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Sign in and persist the session
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(short, long)]
        username: String,

        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Sign out and discard the persisted session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Show the signed-in user's order history
    Orders,
    /// Interactive shopping session: build a cart and check out
    Shop,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List the catalog
    List {
        /// Case-insensitive name filter
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a product to the catalog (admin)
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price, e.g. 19.99
        #[arg(short, long)]
        price: rust_decimal::Decimal,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Image URL
        #[arg(short = 'u', long)]
        image_url: Option<String>,
    },
    /// Remove a product by ID (admin)
    Remove {
        /// Product ID
        #[arg(short, long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let mut storefront = Storefront::new(config)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List { search } => {
                commands::products::list(&mut storefront, search.as_deref()).await?;
            }
            ProductsAction::Add {
                name,
                price,
                description,
                image_url,
            } => {
                commands::products::add(&storefront, name, price, description, image_url).await?;
            }
            ProductsAction::Remove { id } => commands::products::remove(&storefront, id).await?,
        },
        Commands::Login { email } => commands::auth::login(&mut storefront, &email).await?,
        Commands::Register { username, email } => {
            commands::auth::register(&mut storefront, &username, &email).await?;
        }
        Commands::Logout => commands::auth::logout(&mut storefront),
        Commands::Whoami => commands::auth::whoami(&storefront),
        Commands::Orders => commands::orders::show(&mut storefront).await?,
        Commands::Shop => commands::shop::run(&mut storefront).await?,
    }
    Ok(())
}
