//! Business DAO (MongoDB) over the platform tenant registry.

use crate::dao::BusinessDao;
use crate::handle::DatabaseHandle;
use crate::mongo::common;
use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::Collection;
use std::sync::Arc;
use tessera_core::fields::{self, coll};
use tessera_core::TesseraResult;
use tracing::debug;

/// MongoDB business DAO.
///
/// Unlike the HR DAOs this one is not tenant-scoped: it reads the tenant
/// registry itself, and exists so services can validate their context.
#[derive(Debug, Clone)]
pub struct MongoBusinessDao {
    handle: Arc<DatabaseHandle>,
}

impl MongoBusinessDao {
    /// Creates a business DAO.
    #[must_use]
    pub fn new(handle: Arc<DatabaseHandle>) -> Self {
        Self { handle }
    }

    fn collection(&self) -> Collection<Document> {
        self.handle.collection(coll::APP_BUSINESSES)
    }
}

#[async_trait]
impl BusinessDao for MongoBusinessDao {
    async fn get(&self, business_id: &str) -> TesseraResult<Option<Document>> {
        debug!("Getting business record {}", business_id);

        let filter = doc! {
            fields::BUSINESS_ID: business_id,
            fields::IS_DELETED: false,
        };
        let row = self.collection().find_one(filter).await?;
        Ok(row.map(common::amend_for_get))
    }
}
