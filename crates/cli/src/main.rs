//! Storedash CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run dashboard database migrations
//! sd-cli migrate
//!
//! # Create a demo store with one of everything
//! sd-cli seed --owner user_123
//!
//! # List a resource through the REST API
//! sd-cli list billboards --store <store-id> --owner user_123
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Create a demo store
//! - `list` - Print a store's records as JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use storedash_core::{ResourceKind, StoreId};

mod commands;

#[derive(Parser)]
#[command(name = "sd-cli")]
#[command(author, version, about = "Storedash CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run dashboard database migrations
    Migrate,
    /// Create a demo store with one record of each kind and an order
    Seed {
        /// Owner id the store is created for
        #[arg(short, long)]
        owner: String,

        /// Store name
        #[arg(short, long, default_value = "Demo Store")]
        name: String,
    },
    /// List a store's records through the REST API
    List {
        /// Resource kind (`billboards`, `categories`, `sizes`, `colors`,
        /// `products`, `orders`)
        kind: ResourceKind,

        /// Store id
        #[arg(short, long)]
        store: StoreId,

        /// Owner id; required for orders
        #[arg(short, long)]
        owner: Option<String>,

        /// Dashboard origin
        #[arg(long, env = "DASHBOARD_BASE_URL", default_value = "http://localhost:3000")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sd_cli=info,storedash_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

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
        Commands::Seed { owner, name } => commands::seed::demo_store(&owner, &name).await?,
        Commands::List {
            kind,
            store,
            owner,
            base_url,
        } => commands::list::run(kind, store, owner.as_deref(), &base_url).await?,
    }
    Ok(())
}
