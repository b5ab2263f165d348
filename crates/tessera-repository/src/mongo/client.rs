//! Client DAO (MongoDB).

use crate::dao::ClientDao;
use crate::handle::DatabaseHandle;
use crate::mongo::common::{self, execute_find_list};
use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::Collection;
use std::sync::Arc;
use tessera_core::fields::{self, coll};
use tessera_core::{ListQuery, ListResult, TenantContext, TesseraResult};
use tracing::debug;

/// MongoDB client DAO.
#[derive(Debug, Clone)]
pub struct MongoClientDao {
    handle: Arc<DatabaseHandle>,
    ctx: TenantContext,
}

impl MongoClientDao {
    /// Creates a client DAO scoped to the given tenant.
    #[must_use]
    pub fn new(handle: Arc<DatabaseHandle>, ctx: TenantContext) -> Self {
        Self { handle, ctx }
    }

    fn collection(&self) -> Collection<Document> {
        self.handle.collection(coll::HR_CLIENTS)
    }
}

#[async_trait]
impl ClientDao for MongoClientDao {
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!("Listing client records for business {}", self.ctx.business_id());

        let caller = common::parse_filter(query.filter.as_deref());
        let scoped = common::tenant_scope(caller, &self.ctx);
        let base = common::tenant_scope(Document::new(), &self.ctx);

        execute_find_list(&self.collection(), scoped, base, query).await
    }

    async fn get(&self, client_id: &str) -> TesseraResult<Option<Document>> {
        debug!("Getting client record {}", client_id);

        let filter = common::keyed_scope(fields::CLIENT_ID, client_id, &self.ctx);
        let row = self.collection().find_one(filter).await?;
        Ok(row.map(common::amend_for_get))
    }

    async fn find(&self, filter: &str) -> TesseraResult<Option<Document>> {
        debug!("Finding client record by filter");

        let scoped = common::tenant_scope(common::parse_filter(Some(filter)), &self.ctx);
        let row = self.collection().find_one(scoped).await?;
        Ok(row.map(common::amend_for_get))
    }

    async fn create(&self, data: Document) -> TesseraResult<Document> {
        debug!("Creating client record");

        let data = common::stamp_for_create(data);
        self.collection().insert_one(&data).await?;
        Ok(data)
    }

    async fn update(&self, client_id: &str, data: Document) -> TesseraResult<Document> {
        debug!("Updating client record {}", client_id);

        let data = common::stamp_for_update(data);
        let filter = common::keyed(fields::CLIENT_ID, client_id, &self.ctx);
        self.collection()
            .update_one(filter, doc! { "$set": data.clone() })
            .await?;
        Ok(data)
    }

    async fn delete(&self, client_id: &str) -> TesseraResult<u64> {
        debug!("Deleting client record {}", client_id);

        let filter = common::keyed(fields::CLIENT_ID, client_id, &self.ctx);
        let result = self.collection().delete_one(filter).await?;
        Ok(result.deleted_count)
    }

    async fn delete_all(&self) -> TesseraResult<u64> {
        debug!(
            "Deleting all client records for business {}",
            self.ctx.business_id()
        );

        let filter = doc! { fields::BUSINESS_ID: self.ctx.business_id() };
        let result = self.collection().delete_many(filter).await?;
        Ok(result.deleted_count)
    }
}
