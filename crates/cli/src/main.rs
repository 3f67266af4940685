//! Atelier CLI - Database tooling and the shop client.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! atelier-cli migrate
//!
//! # Seed the product catalogue
//! atelier-cli seed
//!
//! # Browse the catalogue
//! atelier-cli products
//! atelier-cli products --id 3
//!
//! # Account
//! atelier-cli register -n "Ada" -e ada@example.com -p "a strong password"
//! atelier-cli login -e ada@example.com -p "a strong password"
//! atelier-cli whoami
//! atelier-cli logout
//!
//! # Cart (guest shadow until logged in, server cart afterwards)
//! atelier-cli cart add 3 --quantity 2
//! atelier-cli cart remove 3
//! atelier-cli cart show
//! atelier-cli cart count
//! atelier-cli cart merge
//! ```
//!
//! # Environment Variables
//!
//! - `ATELIER_API_URL` - API base URL (default: http://localhost:5000)
//! - `ATELIER_STATE_DIR` - Where the token and guest cart live
//! - `ATELIER_DATABASE_URL` - `PostgreSQL` connection string (migrate/seed)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod client;
mod commands;
mod guest_cart;
mod session;

#[derive(Parser)]
#[command(name = "atelier-cli")]
#[command(author, version, about = "Atelier CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the product catalogue with sample data
    Seed,
    /// Register a new account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Login and store the bearer token
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Discard the stored bearer token
    Logout,
    /// Show the logged-in user's profile
    Whoami,
    /// Browse the product catalogue
    Products {
        /// Show a single product instead of the full listing
        #[arg(long)]
        id: Option<i32>,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart (or bump its quantity)
    Add {
        /// Product id
        product_id: i32,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        product_id: i32,
    },
    /// Show the cart's items
    Show,
    /// Show the cart's item count
    Count,
    /// Push the guest cart into the server cart (requires login)
    Merge,
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
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Register {
            name,
            email,
            password,
        } => commands::shop::register(&name, &email, &password).await?,
        Commands::Login { email, password } => commands::shop::login(&email, &password).await?,
        Commands::Logout => commands::shop::logout()?,
        Commands::Whoami => commands::shop::whoami().await?,
        Commands::Products { id } => match id {
            Some(id) => commands::shop::show_product(id).await?,
            None => commands::shop::list_products().await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
            } => commands::shop::cart_add(product_id, quantity).await?,
            CartAction::Remove { product_id } => commands::shop::cart_remove(product_id).await?,
            CartAction::Show => commands::shop::cart_show().await?,
            CartAction::Count => commands::shop::cart_count().await?,
            CartAction::Merge => commands::shop::cart_merge().await?,
        },
    }
    Ok(())
}
