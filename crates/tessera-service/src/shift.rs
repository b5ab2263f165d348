//! Shift service.

use crate::validate::validate_business;
use async_trait::async_trait;
use bson::{doc, Document};
use std::sync::Arc;
use tessera_core::fields;
use tessera_core::{id, ListQuery, ListResult, TenantContext, TesseraError, TesseraResult};
use tessera_repository::{BusinessDao, ShiftDao};
use tracing::{debug, info};

const RESOURCE: &str = "shift";
const ID_PREFIX: &str = "shft";

/// Shift service trait.
#[async_trait]
pub trait ShiftService: Send + Sync {
    /// Lists shift records with filter, sort, and pagination.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets a shift record by id.
    async fn get(&self, shift_id: &str) -> TesseraResult<Document>;

    /// Finds the first shift record matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Document>;

    /// Creates a shift record.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates a shift record; key fields in the payload are ignored.
    async fn update(&self, shift_id: &str, data: Document) -> TesseraResult<Document>;

    /// Deletes a shift record, softly unless `permanent`.
    async fn delete(&self, shift_id: &str, permanent: bool) -> TesseraResult<()>;
}

/// Shift service implementation.
pub struct ShiftServiceImpl {
    dao: Arc<dyn ShiftDao>,
    ctx: TenantContext,
}

impl ShiftServiceImpl {
    /// Creates the service after validating the tenant context.
    pub async fn new(
        dao: Arc<dyn ShiftDao>,
        business_dao: Arc<dyn BusinessDao>,
        ctx: TenantContext,
    ) -> TesseraResult<Self> {
        validate_business(business_dao.as_ref(), &ctx).await?;
        Ok(Self { dao, ctx })
    }
}

#[async_trait]
impl ShiftService for ShiftServiceImpl {
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!("Listing shift records");
        self.dao.list(query).await
    }

    async fn get(&self, shift_id: &str) -> TesseraResult<Document> {
        debug!("Getting shift record {}", shift_id);
        self.dao
            .get(shift_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, shift_id))
    }

    async fn find(&self, filter: &str) -> TesseraResult<Document> {
        debug!("Finding shift record");
        self.dao
            .find(filter)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, filter))
    }

    async fn create(&self, mut data: Document) -> TesseraResult<Document> {
        let shift_id = match data.get_str(fields::SHIFT_ID) {
            Ok(supplied) => id::normalize(supplied),
            Err(_) => id::generate(ID_PREFIX),
        };
        debug!("Creating shift record {}", shift_id);

        data.insert(fields::SHIFT_ID, shift_id.clone());
        data.insert(fields::BUSINESS_ID, self.ctx.business_id());

        if self.dao.get(&shift_id).await?.is_some() {
            return Err(TesseraError::duplicate_id(RESOURCE, shift_id));
        }

        let created = self.dao.create(data).await?;
        info!("Shift record created: {}", shift_id);
        Ok(created)
    }

    async fn update(&self, shift_id: &str, mut data: Document) -> TesseraResult<Document> {
        debug!("Updating shift record {}", shift_id);

        self.dao
            .get(shift_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, shift_id))?;

        // Key fields are immutable
        data.remove(fields::SHIFT_ID);
        data.remove(fields::BUSINESS_ID);

        let updated = self.dao.update(shift_id, data).await?;
        info!("Shift record updated: {}", shift_id);
        Ok(updated)
    }

    async fn delete(&self, shift_id: &str, permanent: bool) -> TesseraResult<()> {
        debug!("Deleting shift record {} (permanent: {})", shift_id, permanent);

        if permanent {
            let deleted = self.dao.delete(shift_id).await?;
            if deleted == 0 {
                return Err(TesseraError::not_found(RESOURCE, shift_id));
            }
        } else {
            self.update(shift_id, doc! { fields::IS_DELETED: true })
                .await?;
        }

        info!("Shift record deleted: {}", shift_id);
        Ok(())
    }
}

impl std::fmt::Debug for ShiftServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShiftServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{business_dao_with, MemoryShiftDao};

    async fn service(dao: Arc<MemoryShiftDao>) -> ShiftServiceImpl {
        ShiftServiceImpl::new(
            dao,
            business_dao_with(&["business003"]),
            TenantContext::new("business003").unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let dao = MemoryShiftDao::new();
        let service = service(Arc::clone(&dao)).await;

        let created = service
            .create(doc! { "shift_from": "09:00", "shift_to": "17:00" })
            .await
            .unwrap();
        let shift_id = created.get_str("shift_id").unwrap().to_string();
        assert!(shift_id.starts_with("shft"));

        let fetched = service.get(&shift_id).await.unwrap();
        assert_eq!(fetched.get_str("shift_from").unwrap(), "09:00");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let dao = MemoryShiftDao::new();
        let service = service(Arc::clone(&dao)).await;

        service.create(doc! { "shift_id": "shft01" }).await.unwrap();
        let result = service.create(doc! { "shift_id": "shft01" }).await;
        assert!(matches!(result, Err(TesseraError::DuplicateId { .. })));
    }

    #[tokio::test]
    async fn test_update_preserves_tenant() {
        let dao = MemoryShiftDao::new();
        let service = service(Arc::clone(&dao)).await;

        service.create(doc! { "shift_id": "shft01" }).await.unwrap();
        service
            .update("shft01", doc! { "business_id": "other", "shift_to": "18:00" })
            .await
            .unwrap();

        let stored = dao.store().raw("shft01").unwrap();
        assert_eq!(stored.get_str("business_id").unwrap(), "business003");
        assert_eq!(stored.get_str("shift_to").unwrap(), "18:00");
    }
}
