pub mod entities;
pub mod migrator;
pub mod seed;

use sea_orm::{Database, DatabaseConnection};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./datagrid.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./datagrid.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// In-memory SQLite, one connection
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn connects_in_memory() {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        assert_eq!(db.get_database_backend(), sea_orm::DbBackend::Sqlite);
    }
}
