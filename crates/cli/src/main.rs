//! GoMarketplace CLI - Persistent shopping cart from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart (table or stored JSON)
//! gm-cart show
//! gm-cart show --json
//!
//! # Add a product with quantity 1
//! gm-cart add --id mug --title "Coffee mug" --image-url https://cdn.example.com/mug.png --price 12.50
//!
//! # Change quantities (never below 1)
//! gm-cart increment mug
//! gm-cart decrement mug
//! ```
//!
//! The cart is stored under `CART_STORAGE_DIR` (default `.gomarketplace`).
//! Pass `--storage-dir` to override it for one invocation.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gomarketplace_cart::{CartStoreBuilder, FileStore};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "gm-cart")]
#[command(author, version, about = "GoMarketplace cart tools")]
struct Cli {
    /// Directory holding the stored cart (overrides `CART_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    Show {
        /// Print the stored JSON form instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a product to the cart with quantity 1
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price (e.g. 12.50)
        #[arg(long)]
        price: String,
    },
    /// Add one unit of a product in the cart
    Increment {
        /// Product ID
        id: String,
    },
    /// Remove one unit of a product in the cart (stops at 1)
    Decrement {
        /// Product ID
        id: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CliConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the tracing subscriber. Logs go to stderr so stdout stays clean.
fn init_tracing(format: LogFormat) {
    // Defaults to warnings only so command output is not interleaved with logs
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gomarketplace_cart=warn,gm_cart=info".into());

    let json = format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(env_filter)
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = CliConfig::from_env().expect("Failed to load configuration");
    if let Some(dir) = cli.storage_dir.clone() {
        config.cart.storage_dir = dir;
    }

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing(config.log_format);

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = CartStoreBuilder::from_config(&config.cart)
        .storage(FileStore::new(&config.cart.storage_dir))
        .build()
        .await?;

    match cli.command {
        Commands::Show { json } => commands::cart::show(&store, json).await?,
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => commands::cart::add(&store, &id, title, image_url, &price).await?,
        Commands::Increment { id } => commands::cart::increment(&store, &id).await?,
        Commands::Decrement { id } => commands::cart::decrement(&store, &id).await?,
    }
    Ok(())
}
