use anyhow::Context;
use clap::{Parser, Subcommand};
use reddit_server::auth::{Argon2Hasher, PasswordHasher};
use reddit_server::config::Config;
use reddit_server::constants::DEFAULT_CONFIG_PATH;
use reddit_server::storage::{InMemoryStorage, Storage};
use reddit_server::{logging, metrics, server};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[cfg(feature = "db")]
use reddit_server::{db::DatabaseManager, storage::DatabaseStorage};

#[derive(Parser)]
#[command(name = "reddit_server")]
#[command(about = "GraphQL backend for posts and user accounts")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run migrations and serve the GraphQL API (default)
    Serve {
        /// Port to run the server on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Use in-memory storage instead of the database (data will not persist)
        #[arg(long)]
        in_memory: bool,
    },
    /// Apply pending database migrations and exit
    Migrate,
}

#[cfg(feature = "db")]
async fn open_database(config: &Config) -> anyhow::Result<Arc<DatabaseManager>> {
    let manager = DatabaseManager::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    manager
        .run_migrations()
        .await
        .context("Failed to run database migrations")?;
    Ok(Arc::new(manager))
}

async fn create_storage(config: &Config, in_memory: bool) -> anyhow::Result<Arc<dyn Storage>> {
    if in_memory {
        info!("Using in-memory storage (data will not persist)");
        return Ok(Arc::new(InMemoryStorage::new()));
    }

    #[cfg(feature = "db")]
    {
        let manager = open_database(config).await?;
        info!("Database storage initialized successfully");
        Ok(Arc::new(DatabaseStorage::new(manager)))
    }
    #[cfg(not(feature = "db"))]
    {
        let _ = config;
        anyhow::bail!("Database feature not enabled. Rebuild with --features db or pass --in-memory");
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve {
        port: None,
        in_memory: false,
    }) {
        Commands::Serve { port, in_memory } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            let addr: SocketAddr = config
                .bind_addr()
                .parse()
                .with_context(|| format!("Invalid bind address {}", config.bind_addr()))?;

            metrics::init();
            let storage = create_storage(&config, in_memory).await?;
            let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());

            server::start_server(storage, hasher, addr).await
        }
        Commands::Migrate => {
            #[cfg(feature = "db")]
            {
                open_database(&config).await?;
                Ok(())
            }
            #[cfg(not(feature = "db"))]
            {
                anyhow::bail!("Database feature not enabled. Rebuild with --features db");
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    let _log_guard = logging::init_logging(&config.logging);

    if let Err(e) = run(cli, config).await {
        error!("Fatal: {:#}", e);
        return Err(e);
    }
    Ok(())
}
