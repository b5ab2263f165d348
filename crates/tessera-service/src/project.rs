//! Project service.

use crate::validate::validate_business;
use async_trait::async_trait;
use bson::{doc, Document};
use std::sync::Arc;
use tessera_core::fields;
use tessera_core::{id, ListQuery, ListResult, TenantContext, TesseraError, TesseraResult};
use tessera_repository::{BusinessDao, ProjectDao};
use tracing::{debug, info};

const RESOURCE: &str = "project";
const ID_PREFIX: &str = "proj";

/// Project service trait.
#[async_trait]
pub trait ProjectService: Send + Sync {
    /// Lists project records, each enriched with client info.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets a project record by id, enriched with client info.
    async fn get(&self, project_id: &str) -> TesseraResult<Document>;

    /// Finds the first project record matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Document>;

    /// Creates a project record.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates a project record; key fields in the payload are ignored.
    async fn update(&self, project_id: &str, data: Document) -> TesseraResult<Document>;

    /// Deletes a project record, softly unless `permanent`.
    async fn delete(&self, project_id: &str, permanent: bool) -> TesseraResult<()>;

    /// Permanently deletes every project record in the tenant scope;
    /// returns the deleted count.
    async fn delete_all(&self) -> TesseraResult<u64>;
}

/// Project service implementation.
pub struct ProjectServiceImpl {
    dao: Arc<dyn ProjectDao>,
    ctx: TenantContext,
}

impl ProjectServiceImpl {
    /// Creates the service after validating the tenant context.
    pub async fn new(
        dao: Arc<dyn ProjectDao>,
        business_dao: Arc<dyn BusinessDao>,
        ctx: TenantContext,
    ) -> TesseraResult<Self> {
        validate_business(business_dao.as_ref(), &ctx).await?;
        Ok(Self { dao, ctx })
    }
}

#[async_trait]
impl ProjectService for ProjectServiceImpl {
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!("Listing project records");
        self.dao.list(query).await
    }

    async fn get(&self, project_id: &str) -> TesseraResult<Document> {
        debug!("Getting project record {}", project_id);
        self.dao
            .get(project_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, project_id))
    }

    async fn find(&self, filter: &str) -> TesseraResult<Document> {
        debug!("Finding project record");
        self.dao
            .find(filter)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, filter))
    }

    async fn create(&self, mut data: Document) -> TesseraResult<Document> {
        let project_id = match data.get_str(fields::PROJECT_ID) {
            Ok(supplied) => id::normalize(supplied),
            Err(_) => id::generate(ID_PREFIX),
        };
        debug!("Creating project record {}", project_id);

        data.insert(fields::PROJECT_ID, project_id.clone());
        data.insert(fields::BUSINESS_ID, self.ctx.business_id());

        if self.dao.get(&project_id).await?.is_some() {
            return Err(TesseraError::duplicate_id(RESOURCE, project_id));
        }

        let created = self.dao.create(data).await?;
        info!("Project record created: {}", project_id);
        Ok(created)
    }

    async fn update(&self, project_id: &str, mut data: Document) -> TesseraResult<Document> {
        debug!("Updating project record {}", project_id);

        self.dao
            .get(project_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, project_id))?;

        // Key fields are immutable
        data.remove(fields::PROJECT_ID);
        data.remove(fields::BUSINESS_ID);

        let updated = self.dao.update(project_id, data).await?;
        info!("Project record updated: {}", project_id);
        Ok(updated)
    }

    async fn delete(&self, project_id: &str, permanent: bool) -> TesseraResult<()> {
        debug!(
            "Deleting project record {} (permanent: {})",
            project_id, permanent
        );

        if permanent {
            let deleted = self.dao.delete(project_id).await?;
            if deleted == 0 {
                return Err(TesseraError::not_found(RESOURCE, project_id));
            }
        } else {
            self.update(project_id, doc! { fields::IS_DELETED: true })
                .await?;
        }

        info!("Project record deleted: {}", project_id);
        Ok(())
    }

    async fn delete_all(&self) -> TesseraResult<u64> {
        debug!("Deleting all project records");
        let deleted = self.dao.delete_all().await?;
        info!("Deleted {} project records", deleted);
        Ok(deleted)
    }
}

impl std::fmt::Debug for ProjectServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectServiceImpl").finish_non_exhaustive()
    }
}
