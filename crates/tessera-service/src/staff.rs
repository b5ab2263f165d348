//! Staff service.

use crate::validate::validate_business;
use async_trait::async_trait;
use bson::{doc, Document};
use std::sync::Arc;
use tessera_core::fields;
use tessera_core::{id, ListQuery, ListResult, TenantContext, TesseraError, TesseraResult};
use tessera_repository::{BusinessDao, StaffDao};
use tracing::{debug, info};

const RESOURCE: &str = "staff";
const ID_PREFIX: &str = "stf";

/// Staff service trait.
#[async_trait]
pub trait StaffService: Send + Sync {
    /// Lists staff records with filter, sort, and pagination.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets a staff record by id.
    async fn get(&self, staff_id: &str) -> TesseraResult<Document>;

    /// Finds the first staff record matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Document>;

    /// Creates a staff record.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates a staff record; key fields in the payload are ignored.
    async fn update(&self, staff_id: &str, data: Document) -> TesseraResult<Document>;

    /// Deletes a staff record, softly unless `permanent`.
    async fn delete(&self, staff_id: &str, permanent: bool) -> TesseraResult<()>;
}

/// Staff service implementation.
pub struct StaffServiceImpl {
    dao: Arc<dyn StaffDao>,
    ctx: TenantContext,
}

impl StaffServiceImpl {
    /// Creates the service after validating the tenant context.
    pub async fn new(
        dao: Arc<dyn StaffDao>,
        business_dao: Arc<dyn BusinessDao>,
        ctx: TenantContext,
    ) -> TesseraResult<Self> {
        validate_business(business_dao.as_ref(), &ctx).await?;
        Ok(Self { dao, ctx })
    }
}

#[async_trait]
impl StaffService for StaffServiceImpl {
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!("Listing staff records");
        self.dao.list(query).await
    }

    async fn get(&self, staff_id: &str) -> TesseraResult<Document> {
        debug!("Getting staff record {}", staff_id);
        self.dao
            .get(staff_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, staff_id))
    }

    async fn find(&self, filter: &str) -> TesseraResult<Document> {
        debug!("Finding staff record");
        self.dao
            .find(filter)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, filter))
    }

    async fn create(&self, mut data: Document) -> TesseraResult<Document> {
        let staff_id = match data.get_str(fields::STAFF_ID) {
            Ok(supplied) => id::normalize(supplied),
            Err(_) => id::generate(ID_PREFIX),
        };
        debug!("Creating staff record {}", staff_id);

        data.insert(fields::STAFF_ID, staff_id.clone());
        data.insert(fields::BUSINESS_ID, self.ctx.business_id());

        if self.dao.get(&staff_id).await?.is_some() {
            return Err(TesseraError::duplicate_id(RESOURCE, staff_id));
        }

        let created = self.dao.create(data).await?;
        info!("Staff record created: {}", staff_id);
        Ok(created)
    }

    async fn update(&self, staff_id: &str, mut data: Document) -> TesseraResult<Document> {
        debug!("Updating staff record {}", staff_id);

        self.dao
            .get(staff_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, staff_id))?;

        // Key fields are immutable
        data.remove(fields::STAFF_ID);
        data.remove(fields::BUSINESS_ID);

        let updated = self.dao.update(staff_id, data).await?;
        info!("Staff record updated: {}", staff_id);
        Ok(updated)
    }

    async fn delete(&self, staff_id: &str, permanent: bool) -> TesseraResult<()> {
        debug!("Deleting staff record {} (permanent: {})", staff_id, permanent);

        if permanent {
            let deleted = self.dao.delete(staff_id).await?;
            if deleted == 0 {
                return Err(TesseraError::not_found(RESOURCE, staff_id));
            }
        } else {
            self.update(staff_id, doc! { fields::IS_DELETED: true })
                .await?;
        }

        info!("Staff record deleted: {}", staff_id);
        Ok(())
    }
}

impl std::fmt::Debug for StaffServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaffServiceImpl").finish_non_exhaustive()
    }
}
