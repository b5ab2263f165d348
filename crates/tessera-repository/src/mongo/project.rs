//! Project DAO (MongoDB).

use crate::dao::ProjectDao;
use crate::handle::DatabaseHandle;
use crate::mongo::common::{self, execute_pipeline_list};
use crate::mongo::pipeline::{ListPipeline, LookupSpec};
use async_trait::async_trait;
use bson::{doc, Document};
use futures::stream::TryStreamExt;
use mongodb::Collection;
use std::sync::Arc;
use tessera_core::fields::{self, coll};
use tessera_core::{ListQuery, ListResult, TenantContext, TesseraResult};
use tracing::debug;

/// MongoDB project DAO.
///
/// Lists and keyed reads are aggregation-based: each project row is
/// enriched with its client record (`client_info`).
#[derive(Debug, Clone)]
pub struct MongoProjectDao {
    handle: Arc<DatabaseHandle>,
    ctx: TenantContext,
}

impl MongoProjectDao {
    /// Creates a project DAO scoped to the given tenant.
    #[must_use]
    pub fn new(handle: Arc<DatabaseHandle>, ctx: TenantContext) -> Self {
        Self { handle, ctx }
    }

    fn collection(&self) -> Collection<Document> {
        self.handle.collection(coll::HR_PROJECTS)
    }

    fn client_lookup() -> LookupSpec {
        LookupSpec::new(
            coll::HR_CLIENTS,
            fields::CLIENT_ID,
            fields::CLIENT_ID,
            fields::CLIENT_INFO,
        )
    }
}

#[async_trait]
impl ProjectDao for MongoProjectDao {
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!(
            "Listing project records for business {}",
            self.ctx.business_id()
        );

        let caller = common::parse_filter(query.filter.as_deref());
        let scoped = common::tenant_scope(caller, &self.ctx);
        let base = common::tenant_scope(Document::new(), &self.ctx);

        let pipeline = ListPipeline::new()
            .match_stage(scoped.clone())
            .lookup(&Self::client_lookup())
            .sort(common::parse_sort(query.sort.as_deref()))
            .paginate(query.skip, query.limit)
            .build();

        execute_pipeline_list(&self.collection(), pipeline, scoped, base).await
    }

    async fn get(&self, project_id: &str) -> TesseraResult<Option<Document>> {
        debug!("Getting project record {}", project_id);

        let filter = common::keyed_scope(fields::PROJECT_ID, project_id, &self.ctx);
        let pipeline = ListPipeline::new()
            .match_stage(filter)
            .lookup(&Self::client_lookup())
            .build();

        let mut cursor = self.collection().aggregate(pipeline).await?;
        let row = cursor.try_next().await?;
        Ok(row)
    }

    async fn find(&self, filter: &str) -> TesseraResult<Option<Document>> {
        debug!("Finding project record by filter");

        let scoped = common::tenant_scope(common::parse_filter(Some(filter)), &self.ctx);
        let row = self.collection().find_one(scoped).await?;
        Ok(row.map(common::amend_for_get))
    }

    async fn create(&self, data: Document) -> TesseraResult<Document> {
        debug!("Creating project record");

        let data = common::stamp_for_create(data);
        self.collection().insert_one(&data).await?;
        Ok(data)
    }

    async fn update(&self, project_id: &str, data: Document) -> TesseraResult<Document> {
        debug!("Updating project record {}", project_id);

        let data = common::stamp_for_update(data);
        let filter = common::keyed(fields::PROJECT_ID, project_id, &self.ctx);
        self.collection()
            .update_one(filter, doc! { "$set": data.clone() })
            .await?;
        Ok(data)
    }

    async fn delete(&self, project_id: &str) -> TesseraResult<u64> {
        debug!("Deleting project record {}", project_id);

        let filter = common::keyed(fields::PROJECT_ID, project_id, &self.ctx);
        let result = self.collection().delete_one(filter).await?;
        Ok(result.deleted_count)
    }

    async fn delete_all(&self) -> TesseraResult<u64> {
        debug!(
            "Deleting all project records for business {}",
            self.ctx.business_id()
        );

        let filter = doc! { fields::BUSINESS_ID: self.ctx.business_id() };
        let result = self.collection().delete_many(filter).await?;
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_lookup_targets_clients_collection() {
        let stage = MongoProjectDao::client_lookup().stage();
        let lookup = stage.get_document("$lookup").unwrap();
        assert_eq!(lookup.get_str("from").unwrap(), "hr_clients");
        assert_eq!(lookup.get_str("localField").unwrap(), "client_id");
        assert_eq!(lookup.get_str("foreignField").unwrap(), "client_id");
        assert_eq!(lookup.get_str("as").unwrap(), "client_info");
    }
}
