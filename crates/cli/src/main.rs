//! Sweet Shop CLI - command-line storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog (no account needed)
//! sweetshop browse --category chocolates --sort price --order desc
//!
//! # Sign in, fill the cart, check out
//! sweetshop login -e jane@example.com -p 'hunter2!'
//! sweetshop cart add <sweet-id> --quantity 2
//! sweetshop cart show
//! sweetshop orders place --address "12 Fudge Lane" --phone 5550123
//!
//! # Session state persists between invocations until logout
//! sweetshop logout
//! ```
//!
//! # Commands
//!
//! - `login` / `register` / `logout` / `whoami` - session management
//! - `browse` / `categories` - catalog queries
//! - `cart` / `wishlist` - synchronized cart and wishlist
//! - `orders` - checkout and order history

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI talks to its user on stdout.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use sweetshop_client::{ClientConfig, SweetShop};

mod commands;

#[derive(Parser)]
#[command(name = "sweetshop")]
#[command(author, version, about = "Sweet Shop command-line storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign into it
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Password confirmation (must match --password)
        #[arg(long)]
        confirm_password: String,
    },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Browse the catalog
    Browse(commands::catalog::BrowseArgs),
    /// List categories with item counts
    Categories,
    /// Inspect or mutate the cart
    Cart {
        #[command(subcommand)]
        action: commands::shop::CartAction,
    },
    /// Inspect or mutate the wishlist
    Wishlist {
        #[command(subcommand)]
        action: commands::shop::WishlistAction,
    },
    /// Checkout and order history
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrderAction,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let shop = SweetShop::new(&config)?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::account::login(&shop, &email, &password).await?;
        }
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            commands::account::register(&shop, name, email, password, confirm_password).await?;
        }
        Commands::Logout => commands::account::logout(&shop).await,
        Commands::Whoami => commands::account::whoami(&shop),
        Commands::Browse(args) => commands::catalog::browse(&shop, args).await?,
        Commands::Categories => commands::catalog::categories(&shop).await?,
        Commands::Cart { action } => commands::shop::cart(&shop, action).await?,
        Commands::Wishlist { action } => commands::shop::wishlist(&shop, action).await?,
        Commands::Orders { action } => commands::orders::orders(&shop, action).await?,
    }

    Ok(())
}
