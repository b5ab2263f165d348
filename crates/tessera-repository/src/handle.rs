//! Database connection handle management.

use bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tessera_config::DatabaseConfig;
use tessera_core::{TesseraError, TesseraResult};
use tracing::{info, warn};

/// Shared handle to a MongoDB client and its configured database.
///
/// The driver maintains its own connection pool; one handle is shared by
/// every DAO through an `Arc`.
#[derive(Clone)]
pub struct DatabaseHandle {
    client: Client,
    database: Database,
}

impl DatabaseHandle {
    /// Connects to MongoDB using the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> TesseraResult<Self> {
        info!("Connecting to MongoDB...");

        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            warn!("Failed to parse MongoDB connection string: {}", e);
            TesseraError::Database(format!("Invalid connection string: {}", e))
        })?;

        options.app_name = Some(config.app_name.clone());
        options.min_pool_size = Some(config.min_pool_size);
        options.max_pool_size = Some(config.max_pool_size);
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.connect_timeout());

        let client = Client::with_options(options)
            .map_err(|e| TesseraError::Database(format!("Failed to create client: {}", e)))?;
        let database = client.database(&config.database);

        info!("MongoDB connection established");
        Ok(Self { client, database })
    }

    /// Returns the configured database.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Returns a handle to the named collection.
    #[must_use]
    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }

    /// Checks if the database connection is healthy.
    pub async fn health_check(&self) -> TesseraResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| TesseraError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Shuts down the client and its connection pool.
    pub async fn shutdown(self) {
        info!("Closing MongoDB connection pool...");
        self.client.shutdown().await;
        info!("MongoDB connection pool closed");
    }
}

impl std::fmt::Debug for DatabaseHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseHandle")
            .field("database", &self.database.name())
            .finish_non_exhaustive()
    }
}
