//! Coastline CLI - Database migrations and plugin lifecycle tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! coast-cli migrate
//!
//! # Seed a demo shop and currency catalog
//! coast-cli seed
//!
//! # Install all platform plugins (runs their on_install capability)
//! coast-cli plugin install
//!
//! # Uninstall all platform plugins
//! coast-cli plugin uninstall
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with a demo shop and currencies
//! - `plugin install` / `plugin uninstall` - Drive plugin lifecycle hooks

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "coast-cli")]
#[command(author, version, about = "Coastline CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with a demo shop and currency catalog
    Seed,
    /// Manage platform plugins
    Plugin {
        #[command(subcommand)]
        action: PluginAction,
    },
}

#[derive(Subcommand)]
enum PluginAction {
    /// Run every registered plugin's install capability
    Install,
    /// Run every registered plugin's uninstall capability
    Uninstall,
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
        Commands::Plugin { action } => match action {
            PluginAction::Install => commands::plugin::install().await?,
            PluginAction::Uninstall => commands::plugin::uninstall().await?,
        },
    }
    Ok(())
}
