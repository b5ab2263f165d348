//! Leave DAO (MongoDB).

use crate::dao::LeaveDao;
use crate::handle::DatabaseHandle;
use crate::mongo::common::{self, execute_pipeline_list};
use crate::mongo::pipeline::{ListPipeline, LookupSpec};
use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::Collection;
use std::sync::Arc;
use tessera_core::fields::{self, coll};
use tessera_core::{ListQuery, ListResult, TenantContext, TesseraResult};
use tracing::debug;

/// MongoDB leave DAO.
///
/// Lists are aggregation-based: each leave row is enriched with the
/// requesting staff member's profile (`staff_info`).
#[derive(Debug, Clone)]
pub struct MongoLeaveDao {
    handle: Arc<DatabaseHandle>,
    ctx: TenantContext,
}

impl MongoLeaveDao {
    /// Creates a leave DAO scoped to the given tenant (and staff member,
    /// when the context carries one).
    #[must_use]
    pub fn new(handle: Arc<DatabaseHandle>, ctx: TenantContext) -> Self {
        Self { handle, ctx }
    }

    fn collection(&self) -> Collection<Document> {
        self.handle.collection(coll::HR_LEAVES)
    }

    fn staff_lookup() -> LookupSpec {
        LookupSpec::new(
            coll::APP_USERS,
            fields::STAFF_ID,
            fields::APP_USER_ID,
            fields::STAFF_INFO,
        )
        .hide(fields::APP_USER_PASSWORD)
    }
}

#[async_trait]
impl LeaveDao for MongoLeaveDao {
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!("Listing leave records for business {}", self.ctx.business_id());

        let caller = common::parse_filter(query.filter.as_deref());
        let scoped = common::staff_scope(caller, &self.ctx);
        let base = common::staff_scope(Document::new(), &self.ctx);

        let pipeline = ListPipeline::new()
            .match_stage(scoped.clone())
            .lookup(&Self::staff_lookup())
            .sort(common::parse_sort(query.sort.as_deref()))
            .paginate(query.skip, query.limit)
            .build();

        execute_pipeline_list(&self.collection(), pipeline, scoped, base).await
    }

    async fn get(&self, leave_id: &str) -> TesseraResult<Option<Document>> {
        debug!("Getting leave record {}", leave_id);

        let filter = common::keyed_scope(fields::LEAVE_ID, leave_id, &self.ctx);
        let row = self.collection().find_one(filter).await?;
        Ok(row.map(common::amend_for_get))
    }

    async fn find(&self, filter: &str) -> TesseraResult<Option<Document>> {
        debug!("Finding leave record by filter");

        let scoped = common::tenant_scope(common::parse_filter(Some(filter)), &self.ctx);
        let row = self.collection().find_one(scoped).await?;
        Ok(row.map(common::amend_for_get))
    }

    async fn create(&self, data: Document) -> TesseraResult<Document> {
        debug!("Creating leave record");

        let data = common::stamp_for_create(data);
        self.collection().insert_one(&data).await?;
        Ok(data)
    }

    async fn update(&self, leave_id: &str, data: Document) -> TesseraResult<Document> {
        debug!("Updating leave record {}", leave_id);

        let data = common::stamp_for_update(data);
        let filter = common::keyed(fields::LEAVE_ID, leave_id, &self.ctx);
        self.collection()
            .update_one(filter, doc! { "$set": data.clone() })
            .await?;
        Ok(data)
    }

    async fn delete(&self, leave_id: &str) -> TesseraResult<u64> {
        debug!("Deleting leave record {}", leave_id);

        let filter = common::keyed(fields::LEAVE_ID, leave_id, &self.ctx);
        let result = self.collection().delete_one(filter).await?;
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_lookup_targets_app_users() {
        let stage = MongoLeaveDao::staff_lookup().stage();
        let lookup = stage.get_document("$lookup").unwrap();
        assert_eq!(lookup.get_str("from").unwrap(), "app_users");
        assert_eq!(lookup.get_str("as").unwrap(), "staff_info");
    }
}
