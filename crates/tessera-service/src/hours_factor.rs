//! Hours-factor profile service.

use crate::validate::validate_business;
use async_trait::async_trait;
use bson::{doc, Document};
use std::sync::Arc;
use tessera_core::fields;
use tessera_core::{id, ListQuery, ListResult, TenantContext, TesseraError, TesseraResult};
use tessera_repository::{BusinessDao, HoursFactorDao};
use tracing::{debug, info};

const RESOURCE: &str = "hours_factor";
const ID_PREFIX: &str = "hfprof";

/// Hours-factor profile service trait.
#[async_trait]
pub trait HoursFactorService: Send + Sync {
    /// Lists hours-factor profiles with filter, sort, and pagination.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets an hours-factor profile by id.
    async fn get(&self, hours_factor_id: &str) -> TesseraResult<Document>;

    /// Finds the first hours-factor profile matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Document>;

    /// Creates an hours-factor profile.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates an hours-factor profile; key fields in the payload are ignored.
    async fn update(&self, hours_factor_id: &str, data: Document) -> TesseraResult<Document>;

    /// Deletes an hours-factor profile, softly unless `permanent`.
    async fn delete(&self, hours_factor_id: &str, permanent: bool) -> TesseraResult<()>;

    /// Permanently deletes every hours-factor profile in the tenant scope;
    /// returns the deleted count.
    async fn delete_all(&self) -> TesseraResult<u64>;
}

/// Hours-factor profile service implementation.
pub struct HoursFactorServiceImpl {
    dao: Arc<dyn HoursFactorDao>,
    ctx: TenantContext,
}

impl HoursFactorServiceImpl {
    /// Creates the service after validating the tenant context.
    pub async fn new(
        dao: Arc<dyn HoursFactorDao>,
        business_dao: Arc<dyn BusinessDao>,
        ctx: TenantContext,
    ) -> TesseraResult<Self> {
        validate_business(business_dao.as_ref(), &ctx).await?;
        Ok(Self { dao, ctx })
    }
}

#[async_trait]
impl HoursFactorService for HoursFactorServiceImpl {
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!("Listing hours-factor profiles");
        self.dao.list(query).await
    }

    async fn get(&self, hours_factor_id: &str) -> TesseraResult<Document> {
        debug!("Getting hours-factor profile {}", hours_factor_id);
        self.dao
            .get(hours_factor_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, hours_factor_id))
    }

    async fn find(&self, filter: &str) -> TesseraResult<Document> {
        debug!("Finding hours-factor profile");
        self.dao
            .find(filter)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, filter))
    }

    async fn create(&self, mut data: Document) -> TesseraResult<Document> {
        let hours_factor_id = match data.get_str(fields::HOURS_FACTOR_ID) {
            Ok(supplied) => id::normalize(supplied),
            Err(_) => id::generate(ID_PREFIX),
        };
        debug!("Creating hours-factor profile {}", hours_factor_id);

        data.insert(fields::HOURS_FACTOR_ID, hours_factor_id.clone());
        data.insert(fields::BUSINESS_ID, self.ctx.business_id());

        if self.dao.get(&hours_factor_id).await?.is_some() {
            return Err(TesseraError::duplicate_id(RESOURCE, hours_factor_id));
        }

        let created = self.dao.create(data).await?;
        info!("Hours-factor profile created: {}", hours_factor_id);
        Ok(created)
    }

    async fn update(&self, hours_factor_id: &str, mut data: Document) -> TesseraResult<Document> {
        debug!("Updating hours-factor profile {}", hours_factor_id);

        self.dao
            .get(hours_factor_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, hours_factor_id))?;

        // Key fields are immutable
        data.remove(fields::HOURS_FACTOR_ID);
        data.remove(fields::BUSINESS_ID);

        let updated = self.dao.update(hours_factor_id, data).await?;
        info!("Hours-factor profile updated: {}", hours_factor_id);
        Ok(updated)
    }

    async fn delete(&self, hours_factor_id: &str, permanent: bool) -> TesseraResult<()> {
        debug!(
            "Deleting hours-factor profile {} (permanent: {})",
            hours_factor_id, permanent
        );

        if permanent {
            let deleted = self.dao.delete(hours_factor_id).await?;
            if deleted == 0 {
                return Err(TesseraError::not_found(RESOURCE, hours_factor_id));
            }
        } else {
            self.update(hours_factor_id, doc! { fields::IS_DELETED: true })
                .await?;
        }

        info!("Hours-factor profile deleted: {}", hours_factor_id);
        Ok(())
    }

    async fn delete_all(&self) -> TesseraResult<u64> {
        debug!("Deleting all hours-factor profiles");
        let deleted = self.dao.delete_all().await?;
        info!("Deleted {} hours-factor profiles", deleted);
        Ok(deleted)
    }
}

impl std::fmt::Debug for HoursFactorServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoursFactorServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{business_dao_with, MemoryHoursFactorDao};

    async fn service(dao: Arc<MemoryHoursFactorDao>) -> HoursFactorServiceImpl {
        HoursFactorServiceImpl::new(
            dao,
            business_dao_with(&["business003"]),
            TenantContext::new("business003").unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_generates_prefixed_id() {
        let dao = MemoryHoursFactorDao::new();
        let service = service(Arc::clone(&dao)).await;

        let created = service.create(doc! { "factor": 1.5 }).await.unwrap();
        assert!(created.get_str("hours_factor_id").unwrap().starts_with("hfprof"));
        assert_eq!(created.get_str("business_id").unwrap(), "business003");
    }

    #[tokio::test]
    async fn test_update_missing_profile() {
        let service = service(MemoryHoursFactorDao::new()).await;
        let result = service.update("hfprof404", doc! { "factor": 2.0 }).await;
        assert!(matches!(result, Err(TesseraError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_all() {
        let dao = MemoryHoursFactorDao::new();
        let service = service(Arc::clone(&dao)).await;

        service.create(doc! { "hours_factor_id": "hfprof01" }).await.unwrap();
        assert_eq!(service.delete_all().await.unwrap(), 1);
    }
}
