//! Shopfront CLI - command-line storefront frontend.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shopfront products list
//! shopfront products show 3
//! shopfront products search "desk"
//!
//! # Manage the cart (persists across invocations)
//! shopfront cart add 3 --quantity 2
//! shopfront cart show
//!
//! # Authenticate and check out
//! shopfront auth login -u jdoe -p secret
//! shopfront checkout --first-name Jane --last-name Doe \
//!     --address "1 Main St" --city Springfield --state IL \
//!     --zip-code 62704 --phone 555-0100
//! ```
//!
//! Configuration comes from the environment (see `shopfront-client`):
//! `SHOPFRONT_API_BASE_URL` is required.

#![cfg_attr(not(test), forbid(unsafe_code))]
// This binary's job is terminal output.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

use commands::{auth, cart, catalog, checkout, orders};

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Storefront client for the Shopfront REST API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Products {
        #[command(subcommand)]
        action: catalog::ProductAction,
    },
    /// Browse categories
    Categories {
        #[command(subcommand)]
        action: catalog::CategoryAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: cart::CartAction,
    },
    /// Log in, register, or inspect the session
    Auth {
        #[command(subcommand)]
        action: auth::AuthAction,
    },
    /// Submit the cart as an order
    Checkout(checkout::CheckoutArgs),
    /// View order history
    Orders {
        #[command(subcommand)]
        action: orders::OrderAction,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::debug!("Command failed: {e}");
        println!("{}", e.display_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> shopfront_client::error::Result<()> {
    let mut app = commands::App::load()?;

    match cli.command {
        Commands::Products { action } => catalog::run_products(&app, action).await?,
        Commands::Categories { action } => catalog::run_categories(&app, action).await?,
        Commands::Cart { action } => cart::run(&mut app, action).await?,
        Commands::Auth { action } => auth::run(&mut app, action).await?,
        Commands::Checkout(args) => checkout::run(&mut app, args).await?,
        Commands::Orders { action } => orders::run(&app, action).await?,
    }
    Ok(())
}
