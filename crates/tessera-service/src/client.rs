//! Client service.

use crate::validate::validate_business;
use async_trait::async_trait;
use bson::{doc, Document};
use std::sync::Arc;
use tessera_core::fields;
use tessera_core::{id, ListQuery, ListResult, TenantContext, TesseraError, TesseraResult};
use tessera_repository::{BusinessDao, ClientDao};
use tracing::{debug, info};

const RESOURCE: &str = "client";
const ID_PREFIX: &str = "clnt";

/// Client service trait.
#[async_trait]
pub trait ClientService: Send + Sync {
    /// Lists client records with filter, sort, and pagination.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets a client record by id.
    async fn get(&self, client_id: &str) -> TesseraResult<Document>;

    /// Finds the first client record matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Document>;

    /// Creates a client record.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates a client record; key fields in the payload are ignored.
    async fn update(&self, client_id: &str, data: Document) -> TesseraResult<Document>;

    /// Deletes a client record, softly unless `permanent`.
    async fn delete(&self, client_id: &str, permanent: bool) -> TesseraResult<()>;

    /// Permanently deletes every client record in the tenant scope;
    /// returns the deleted count.
    async fn delete_all(&self) -> TesseraResult<u64>;
}

/// Client service implementation.
pub struct ClientServiceImpl {
    dao: Arc<dyn ClientDao>,
    ctx: TenantContext,
}

impl ClientServiceImpl {
    /// Creates the service after validating the tenant context.
    pub async fn new(
        dao: Arc<dyn ClientDao>,
        business_dao: Arc<dyn BusinessDao>,
        ctx: TenantContext,
    ) -> TesseraResult<Self> {
        validate_business(business_dao.as_ref(), &ctx).await?;
        Ok(Self { dao, ctx })
    }
}

#[async_trait]
impl ClientService for ClientServiceImpl {
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!("Listing client records");
        self.dao.list(query).await
    }

    async fn get(&self, client_id: &str) -> TesseraResult<Document> {
        debug!("Getting client record {}", client_id);
        self.dao
            .get(client_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, client_id))
    }

    async fn find(&self, filter: &str) -> TesseraResult<Document> {
        debug!("Finding client record");
        self.dao
            .find(filter)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, filter))
    }

    async fn create(&self, mut data: Document) -> TesseraResult<Document> {
        let client_id = match data.get_str(fields::CLIENT_ID) {
            Ok(supplied) => id::normalize(supplied),
            Err(_) => id::generate(ID_PREFIX),
        };
        debug!("Creating client record {}", client_id);

        data.insert(fields::CLIENT_ID, client_id.clone());
        data.insert(fields::BUSINESS_ID, self.ctx.business_id());

        if self.dao.get(&client_id).await?.is_some() {
            return Err(TesseraError::duplicate_id(RESOURCE, client_id));
        }

        let created = self.dao.create(data).await?;
        info!("Client record created: {}", client_id);
        Ok(created)
    }

    async fn update(&self, client_id: &str, mut data: Document) -> TesseraResult<Document> {
        debug!("Updating client record {}", client_id);

        self.dao
            .get(client_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, client_id))?;

        // Key fields are immutable
        data.remove(fields::CLIENT_ID);
        data.remove(fields::BUSINESS_ID);

        let updated = self.dao.update(client_id, data).await?;
        info!("Client record updated: {}", client_id);
        Ok(updated)
    }

    async fn delete(&self, client_id: &str, permanent: bool) -> TesseraResult<()> {
        debug!(
            "Deleting client record {} (permanent: {})",
            client_id, permanent
        );

        if permanent {
            let deleted = self.dao.delete(client_id).await?;
            if deleted == 0 {
                return Err(TesseraError::not_found(RESOURCE, client_id));
            }
        } else {
            self.update(client_id, doc! { fields::IS_DELETED: true })
                .await?;
        }

        info!("Client record deleted: {}", client_id);
        Ok(())
    }

    async fn delete_all(&self) -> TesseraResult<u64> {
        debug!("Deleting all client records");
        let deleted = self.dao.delete_all().await?;
        info!("Deleted {} client records", deleted);
        Ok(deleted)
    }
}

impl std::fmt::Debug for ClientServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{business_dao_with, MemoryClientDao};

    async fn service(dao: Arc<MemoryClientDao>) -> ClientServiceImpl {
        ClientServiceImpl::new(
            dao,
            business_dao_with(&["business003"]),
            TenantContext::new("business003").unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let dao = MemoryClientDao::new();
        let service = service(Arc::clone(&dao)).await;

        service.create(doc! { "client_name": "Acme" }).await.unwrap();
        service.create(doc! { "client_name": "Globex" }).await.unwrap();

        let result = service.list(&ListQuery::new()).await.unwrap();
        assert_eq!(result.summary.result_size, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let dao = MemoryClientDao::new();
        let service = service(Arc::clone(&dao)).await;

        service.create(doc! { "client_id": "clnt01" }).await.unwrap();
        let result = service.create(doc! { "client_id": "clnt01" }).await;
        assert!(matches!(result, Err(TesseraError::DuplicateId { .. })));
    }

    #[tokio::test]
    async fn test_soft_delete_then_restore_via_dao() {
        let dao = MemoryClientDao::new();
        let service = service(Arc::clone(&dao)).await;

        service.create(doc! { "client_id": "clnt01" }).await.unwrap();
        service.delete("clnt01", false).await.unwrap();
        assert!(matches!(
            service.get("clnt01").await,
            Err(TesseraError::NotFound { .. })
        ));

        // Soft delete is a flag flip: flipping it back restores visibility
        dao.update("clnt01", doc! { "is_deleted": false }).await.unwrap();
        assert!(service.get("clnt01").await.is_ok());
    }
}
