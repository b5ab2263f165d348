//! Shared helpers for MongoDB integration tests.

use std::sync::Arc;
use tessera_config::DatabaseConfig;
use tessera_core::TenantContext;
use tessera_repository::DatabaseHandle;
use uuid::Uuid;

/// A throwaway database on the server named by `TESSERA_TEST_MONGODB_URI`.
///
/// Returns `None` when the variable is unset so the suite skips cleanly on
/// machines without a test server.
pub struct TestDatabase {
    handle: Arc<DatabaseHandle>,
}

impl TestDatabase {
    pub async fn connect() -> Option<Self> {
        let uri = std::env::var("TESSERA_TEST_MONGODB_URI").ok()?;

        let config = DatabaseConfig {
            uri,
            database: format!("tessera_test_{}", Uuid::new_v4().simple()),
            ..DatabaseConfig::default()
        };
        let handle = DatabaseHandle::connect(&config)
            .await
            .expect("Failed to connect to test MongoDB");

        Some(Self {
            handle: Arc::new(handle),
        })
    }

    pub fn handle(&self) -> Arc<DatabaseHandle> {
        Arc::clone(&self.handle)
    }

    pub async fn cleanup(&self) {
        self.handle
            .database()
            .drop()
            .await
            .expect("Failed to drop test database");
    }
}

pub fn tenant(business_id: &str) -> TenantContext {
    TenantContext::new(business_id).unwrap()
}
