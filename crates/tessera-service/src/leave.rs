//! Leave service.

use crate::validate::{validate_business, validate_staff};
use async_trait::async_trait;
use bson::{doc, Document};
use std::sync::Arc;
use tessera_core::fields;
use tessera_core::{id, ListQuery, ListResult, TenantContext, TesseraError, TesseraResult};
use tessera_repository::{BusinessDao, LeaveDao, StaffDao};
use tracing::{debug, info};

const RESOURCE: &str = "leave";
const ID_PREFIX: &str = "leav";

/// Leave service trait.
#[async_trait]
pub trait LeaveService: Send + Sync {
    /// Lists leave records, each enriched with staff info.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets a leave record by id.
    async fn get(&self, leave_id: &str) -> TesseraResult<Document>;

    /// Finds the first leave record matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Document>;

    /// Creates a leave record.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates a leave record; key fields in the payload are ignored.
    async fn update(&self, leave_id: &str, data: Document) -> TesseraResult<Document>;

    /// Deletes a leave record, softly unless `permanent`.
    async fn delete(&self, leave_id: &str, permanent: bool) -> TesseraResult<()>;
}

/// Leave service implementation.
pub struct LeaveServiceImpl {
    dao: Arc<dyn LeaveDao>,
    ctx: TenantContext,
}

impl LeaveServiceImpl {
    /// Creates the service after validating the tenant context. The staff
    /// member named by the context must exist.
    pub async fn new(
        dao: Arc<dyn LeaveDao>,
        staff_dao: Arc<dyn StaffDao>,
        business_dao: Arc<dyn BusinessDao>,
        ctx: TenantContext,
    ) -> TesseraResult<Self> {
        validate_business(business_dao.as_ref(), &ctx).await?;
        validate_staff(staff_dao.as_ref(), &ctx).await?;
        Ok(Self { dao, ctx })
    }
}

#[async_trait]
impl LeaveService for LeaveServiceImpl {
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!("Listing leave records");
        self.dao.list(query).await
    }

    async fn get(&self, leave_id: &str) -> TesseraResult<Document> {
        debug!("Getting leave record {}", leave_id);
        self.dao
            .get(leave_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, leave_id))
    }

    async fn find(&self, filter: &str) -> TesseraResult<Document> {
        debug!("Finding leave record");
        self.dao
            .find(filter)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, filter))
    }

    async fn create(&self, mut data: Document) -> TesseraResult<Document> {
        let leave_id = match data.get_str(fields::LEAVE_ID) {
            Ok(supplied) => id::normalize(supplied),
            Err(_) => id::generate(ID_PREFIX),
        };
        debug!("Creating leave record {}", leave_id);

        data.insert(fields::LEAVE_ID, leave_id.clone());
        data.insert(fields::BUSINESS_ID, self.ctx.business_id());
        if let Some(staff_id) = self.ctx.staff_id() {
            data.insert(fields::STAFF_ID, staff_id);
        }

        if self.dao.get(&leave_id).await?.is_some() {
            return Err(TesseraError::duplicate_id(RESOURCE, leave_id));
        }

        let created = self.dao.create(data).await?;
        info!("Leave record created: {}", leave_id);
        Ok(created)
    }

    async fn update(&self, leave_id: &str, mut data: Document) -> TesseraResult<Document> {
        debug!("Updating leave record {}", leave_id);

        self.dao
            .get(leave_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, leave_id))?;

        // Key fields are immutable
        data.remove(fields::LEAVE_ID);
        data.remove(fields::BUSINESS_ID);
        data.remove(fields::STAFF_ID);

        let updated = self.dao.update(leave_id, data).await?;
        info!("Leave record updated: {}", leave_id);
        Ok(updated)
    }

    async fn delete(&self, leave_id: &str, permanent: bool) -> TesseraResult<()> {
        debug!("Deleting leave record {} (permanent: {})", leave_id, permanent);

        if permanent {
            let deleted = self.dao.delete(leave_id).await?;
            if deleted == 0 {
                return Err(TesseraError::not_found(RESOURCE, leave_id));
            }
        } else {
            self.update(leave_id, doc! { fields::IS_DELETED: true })
                .await?;
        }

        info!("Leave record deleted: {}", leave_id);
        Ok(())
    }
}

impl std::fmt::Debug for LeaveServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaveServiceImpl").finish_non_exhaustive()
    }
}
