// src/main.rs

use anyhow::{Context, Result};
use chomp_recipes::server::{self, RecipesConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "chomp-recipes")]
#[command(author, version, about = "Recipe service that hydrates recipes from the user and ingredient services", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the recipe HTTP service
    Serve {
        /// Path to the TOML configuration file
        #[arg(short, long)]
        config: PathBuf,
        /// Override the bind address from the configuration
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Initialize the recipe database
    Init {
        /// Database path
        #[arg(short, long, default_value = "/var/lib/chomp/recipes.db")]
        db_path: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, bind } => {
            let file_config = RecipesConfig::load(&config)?;
            let mut server_config = file_config.to_server_config()?;
            if let Some(bind) = bind {
                server_config.bind_addr = bind
                    .parse()
                    .with_context(|| format!("Invalid bind address: {}", bind))?;
            }

            // The blocking HTTP clients live outside the runtime
            let service = Arc::new(server::build_service(&server_config)?);

            let runtime = tokio::runtime::Runtime::new()
                .context("Failed to start the async runtime")?;
            let result = runtime.block_on(server::run_server(server_config, Arc::clone(&service)));
            drop(runtime);
            drop(service);
            result
        }
        Commands::Init { db_path } => {
            info!("Initializing recipe database at: {}", db_path.display());
            chomp_recipes::db::init(&db_path)?;
            println!("Database initialized successfully at: {}", db_path.display());
            Ok(())
        }
    }
}
