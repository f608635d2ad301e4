//! Stampede - Entry Point
//!
//! Operator CLI for the cache-aside layer. Lives in the `stampede` facade
//! crate next to the library of the same name.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `stampede config` | Print the effective, validated configuration as TOML |
//! | `stampede providers` | List the registered store providers |
//! | `stampede check` | Build a client and round-trip a marker entry through the store |

// Force-link stampede-providers so linkme store registrations are included
extern crate stampede_providers;

use clap::{Parser, Subcommand};
use stampede_application::ports::registry::list_store_providers;
use stampede_infrastructure::config::loader::to_toml;
use stampede_infrastructure::logging::init_logging;
use stampede_infrastructure::{AppConfig, ConfigLoader, build_client};
use std::path::PathBuf;

const CHECK_MARKER_ID: &str = "__stampede_check__";

/// Command line interface for Stampede
#[derive(Parser, Debug)]
#[command(name = "stampede")]
#[command(about = "Stampede - Cache-aside access layer")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective configuration as TOML after validation
    Config,
    /// List registered store providers
    Providers,
    /// Build a client from configuration and round-trip a marker entry
    Check,
}

fn load_config(path: Option<&std::path::Path>) -> stampede_domain::Result<AppConfig> {
    let loader = match path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

async fn run_check(config: &AppConfig) -> stampede_domain::Result<()> {
    let client = build_client(config)?;
    let ttl = config.ttl.entry_ttl();
    let outcome = async {
        client.set(CHECK_MARKER_ID, "ok", ttl).await?;
        client.invalidate(CHECK_MARKER_ID).await
    }
    .await;
    client.shutdown().await;

    let removed = outcome?;
    println!(
        "store '{}' ok (marker written with {}s TTL and {})",
        client.store().provider_name(),
        ttl.as_secs(),
        if removed { "removed" } else { "already gone" }
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Config => {
            let config = load_config(cli.config.as_deref())?;
            print!("{}", to_toml(&config)?);
        }
        Command::Providers => {
            let mut providers = list_store_providers();
            providers.sort_unstable_by_key(|(name, _)| *name);
            for (name, description) in providers {
                println!("{name:<8} {description}");
            }
        }
        Command::Check => {
            let config = load_config(cli.config.as_deref())?;
            init_logging(config.logging.clone())?;
            run_check(&config).await?;
        }
    }

    Ok(())
}
