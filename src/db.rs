use crate::config::DatabaseConfig;
use crate::error::{AppError, Result};
use libsql::{Builder, Connection, Database};
use tracing::{debug, info};

/// A versioned schema change, applied at most once and in declaration order
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "001_create_post",
        sql: include_str!("../migrations/001_create_post.sql"),
    },
    Migration {
        name: "002_create_user",
        sql: include_str!("../migrations/002_create_user.sql"),
    },
];

const CREATE_MIGRATIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    executed_at TEXT NOT NULL
)";

pub struct DatabaseManager {
    db: Database,
}

impl DatabaseManager {
    /// Open the configured database: a local file, or a remote libSQL server
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db = if config.is_remote() {
            let auth_token = config.auth_token.clone().ok_or_else(|| {
                AppError::Config(format!(
                    "An auth token is required for remote database {}",
                    config.url
                ))
            })?;
            info!("Connecting to remote database at {}", config.url);
            Builder::new_remote(config.url.clone(), auth_token)
                .build()
                .await
        } else {
            info!("Opening local database at {}", config.url);
            Builder::new_local(&config.url).build().await
        }
        .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        Ok(Self { db })
    }

    /// Get a connection to the database
    pub fn get_connection(&self) -> Result<Connection> {
        self.db
            .connect()
            .map_err(|e| AppError::database(format!("Failed to get database connection: {e}")))
    }

    /// Apply every pending migration, returning the names of those applied
    pub async fn run_migrations(&self) -> Result<Vec<&'static str>> {
        info!("Running database migrations...");

        let conn = self.get_connection()?;
        conn.execute(CREATE_MIGRATIONS_TABLE, ())
            .await
            .map_err(|e| AppError::database(format!("Failed to create migrations table: {e}")))?;

        let executed = self.executed_migrations(&conn).await?;
        let mut applied = Vec::new();

        for migration in MIGRATIONS {
            if executed.iter().any(|name| name == migration.name) {
                debug!("Migration {} already applied", migration.name);
                continue;
            }

            let tx = conn
                .transaction()
                .await
                .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;
            tx.execute_batch(migration.sql).await.map_err(|e| {
                AppError::database(format!("Failed to run migration {}: {e}", migration.name))
            })?;
            tx.execute(
                "INSERT INTO schema_migrations (name, executed_at) VALUES (?1, ?2)",
                libsql::params![migration.name, chrono::Utc::now().to_rfc3339()],
            )
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to record migration {}: {e}", migration.name))
            })?;
            tx.commit().await.map_err(|e| {
                AppError::database(format!("Failed to commit migration {}: {e}", migration.name))
            })?;

            info!("Applied migration {}", migration.name);
            applied.push(migration.name);
        }

        info!(
            "Database migrations completed successfully ({} applied)",
            applied.len()
        );
        Ok(applied)
    }

    async fn executed_migrations(&self, conn: &Connection) -> Result<Vec<String>> {
        let mut rows = conn
            .query("SELECT name FROM schema_migrations ORDER BY id", ())
            .await
            .map_err(|e| AppError::database(format!("Failed to query migrations: {e}")))?;

        let mut names = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::database(format!("Failed to read row: {e}")))?
        {
            let name: String = row
                .get(0)
                .map_err(|e| AppError::database(format!("Failed to get name: {e}")))?;
            names.push(name);
        }
        Ok(names)
    }
}
