//! Catalog Sync CLI - Database migrations and connection management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! cs-cli migrate
//!
//! # List tenant connections
//! cs-cli connections list
//!
//! # Delete a connection and all of its sync lines
//! cs-cli connections delete --id 3
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `connections list` - Show configured tenants
//! - `connections delete` - Remove a tenant's connection

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cs-cli")]
#[command(author, version, about = "Catalog Sync CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage tenant connections
    Connections {
        #[command(subcommand)]
        action: ConnectionAction,
    },
}

#[derive(Subcommand)]
enum ConnectionAction {
    /// List all connections
    List,
    /// Delete a connection and cascade its sync lines
    Delete {
        /// Connection ID
        #[arg(short, long)]
        id: i32,
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
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Connections { action } => match action {
            ConnectionAction::List => commands::connections::list().await?,
            ConnectionAction::Delete { id } => commands::connections::delete(id).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["cs-cli", "connections", "delete", "--id", "3"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Connections {
                action: ConnectionAction::Delete { id: 3 }
            })
        ));
    }
}
