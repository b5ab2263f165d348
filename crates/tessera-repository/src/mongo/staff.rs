//! Staff DAO (MongoDB).

use crate::dao::StaffDao;
use crate::handle::DatabaseHandle;
use crate::mongo::common::{self, execute_find_list};
use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::Collection;
use std::sync::Arc;
use tessera_core::fields::{self, coll};
use tessera_core::{ListQuery, ListResult, TenantContext, TesseraResult};
use tracing::debug;

/// MongoDB staff DAO.
#[derive(Debug, Clone)]
pub struct MongoStaffDao {
    handle: Arc<DatabaseHandle>,
    ctx: TenantContext,
}

impl MongoStaffDao {
    /// Creates a staff DAO scoped to the given tenant.
    #[must_use]
    pub fn new(handle: Arc<DatabaseHandle>, ctx: TenantContext) -> Self {
        Self { handle, ctx }
    }

    fn collection(&self) -> Collection<Document> {
        self.handle.collection(coll::HR_STAFFS)
    }
}

#[async_trait]
impl StaffDao for MongoStaffDao {
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!("Listing staff records for business {}", self.ctx.business_id());

        let caller = common::parse_filter(query.filter.as_deref());
        let scoped = common::tenant_scope(caller, &self.ctx);
        let base = common::tenant_scope(Document::new(), &self.ctx);

        execute_find_list(&self.collection(), scoped, base, query).await
    }

    async fn get(&self, staff_id: &str) -> TesseraResult<Option<Document>> {
        debug!("Getting staff record {}", staff_id);

        let filter = common::keyed_scope(fields::STAFF_ID, staff_id, &self.ctx);
        let row = self.collection().find_one(filter).await?;
        Ok(row.map(common::amend_for_get))
    }

    async fn find(&self, filter: &str) -> TesseraResult<Option<Document>> {
        debug!("Finding staff record by filter");

        let scoped = common::tenant_scope(common::parse_filter(Some(filter)), &self.ctx);
        let row = self.collection().find_one(scoped).await?;
        Ok(row.map(common::amend_for_get))
    }

    async fn create(&self, data: Document) -> TesseraResult<Document> {
        debug!("Creating staff record");

        let data = common::stamp_for_create(data);
        self.collection().insert_one(&data).await?;
        Ok(data)
    }

    async fn update(&self, staff_id: &str, data: Document) -> TesseraResult<Document> {
        debug!("Updating staff record {}", staff_id);

        let data = common::stamp_for_update(data);
        let filter = common::keyed(fields::STAFF_ID, staff_id, &self.ctx);
        self.collection()
            .update_one(filter, doc! { "$set": data.clone() })
            .await?;
        Ok(data)
    }

    async fn delete(&self, staff_id: &str) -> TesseraResult<u64> {
        debug!("Deleting staff record {}", staff_id);

        let filter = common::keyed(fields::STAFF_ID, staff_id, &self.ctx);
        let result = self.collection().delete_one(filter).await?;
        Ok(result.deleted_count)
    }
}
