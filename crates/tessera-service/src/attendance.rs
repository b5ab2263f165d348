//! Attendance service.

use crate::validate::{validate_business, validate_staff};
use async_trait::async_trait;
use bson::{doc, Document};
use chrono::Utc;
use std::sync::Arc;
use tessera_core::fields;
use tessera_core::{id, ListQuery, ListResult, TenantContext, TesseraError, TesseraResult};
use tessera_repository::{AttendanceDao, BusinessDao, StaffDao};
use tracing::{debug, info};

const RESOURCE: &str = "attendance";
const ID_PREFIX: &str = "atten";

/// Attendance service trait.
#[async_trait]
pub trait AttendanceService: Send + Sync {
    /// Lists attendance records with filter, sort, and pagination.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets an attendance record by id.
    async fn get(&self, attendance_id: &str) -> TesseraResult<Document>;

    /// Finds the first attendance record matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Document>;

    /// Creates a clock event; the event time is stamped server-side.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates an attendance record; key fields in the payload are ignored.
    async fn update(&self, attendance_id: &str, data: Document) -> TesseraResult<Document>;

    /// Deletes an attendance record, softly unless `permanent`.
    async fn delete(&self, attendance_id: &str, permanent: bool) -> TesseraResult<()>;
}

/// Attendance service implementation.
pub struct AttendanceServiceImpl {
    dao: Arc<dyn AttendanceDao>,
    ctx: TenantContext,
}

impl AttendanceServiceImpl {
    /// Creates the service after validating the tenant context. The staff
    /// member named by the context must exist.
    pub async fn new(
        dao: Arc<dyn AttendanceDao>,
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
impl AttendanceService for AttendanceServiceImpl {
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!("Listing attendance records");
        self.dao.list(query).await
    }

    async fn get(&self, attendance_id: &str) -> TesseraResult<Document> {
        debug!("Getting attendance record {}", attendance_id);
        self.dao
            .get(attendance_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, attendance_id))
    }

    async fn find(&self, filter: &str) -> TesseraResult<Document> {
        debug!("Finding attendance record");
        self.dao
            .find(filter)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, filter))
    }

    async fn create(&self, mut data: Document) -> TesseraResult<Document> {
        let attendance_id = match data.get_str(fields::ATTENDANCE_ID) {
            Ok(supplied) => id::normalize(supplied),
            Err(_) => id::generate(ID_PREFIX),
        };
        debug!("Creating attendance record {}", attendance_id);

        data.insert(fields::ATTENDANCE_ID, attendance_id.clone());
        data.insert(fields::BUSINESS_ID, self.ctx.business_id());
        if let Some(staff_id) = self.ctx.staff_id() {
            data.insert(fields::STAFF_ID, staff_id);
        }
        // Clock events are stamped server-side
        data.insert(
            fields::DATE_TIME,
            bson::DateTime::from_chrono(Utc::now()),
        );

        if self.dao.get(&attendance_id).await?.is_some() {
            return Err(TesseraError::duplicate_id(RESOURCE, attendance_id));
        }

        let created = self.dao.create(data).await?;
        info!("Attendance record created: {}", attendance_id);
        Ok(created)
    }

    async fn update(&self, attendance_id: &str, mut data: Document) -> TesseraResult<Document> {
        debug!("Updating attendance record {}", attendance_id);

        self.dao
            .get(attendance_id)
            .await?
            .ok_or_else(|| TesseraError::not_found(RESOURCE, attendance_id))?;

        // Key fields are immutable
        data.remove(fields::ATTENDANCE_ID);
        data.remove(fields::BUSINESS_ID);
        data.remove(fields::STAFF_ID);

        let updated = self.dao.update(attendance_id, data).await?;
        info!("Attendance record updated: {}", attendance_id);
        Ok(updated)
    }

    async fn delete(&self, attendance_id: &str, permanent: bool) -> TesseraResult<()> {
        debug!(
            "Deleting attendance record {} (permanent: {})",
            attendance_id, permanent
        );

        if permanent {
            let deleted = self.dao.delete(attendance_id).await?;
            if deleted == 0 {
                return Err(TesseraError::not_found(RESOURCE, attendance_id));
            }
        } else {
            self.update(attendance_id, doc! { fields::IS_DELETED: true })
                .await?;
        }

        info!("Attendance record deleted: {}", attendance_id);
        Ok(())
    }
}

impl std::fmt::Debug for AttendanceServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttendanceServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{business_dao_with, MemoryAttendanceDao, MemoryStaffDao};

    async fn seeded_staff_dao() -> Arc<MemoryStaffDao> {
        let dao = MemoryStaffDao::new();
        dao.create(doc! { "staff_id": "stf001", "business_id": "business003" })
            .await
            .unwrap();
        dao
    }

    async fn service(dao: Arc<MemoryAttendanceDao>) -> AttendanceServiceImpl {
        AttendanceServiceImpl::new(
            dao,
            seeded_staff_dao().await,
            business_dao_with(&["business003"]),
            TenantContext::new("business003").unwrap().with_staff("stf001"),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_unknown_staff_is_rejected() {
        let result = AttendanceServiceImpl::new(
            MemoryAttendanceDao::new(),
            MemoryStaffDao::new(),
            business_dao_with(&["business003"]),
            TenantContext::new("business003").unwrap().with_staff("stf404"),
        )
        .await;

        assert!(matches!(
            result,
            Err(TesseraError::InvalidReference { resource_type: "staff", .. })
        ));
    }

    #[tokio::test]
    async fn test_staff_scope_is_optional() {
        let result = AttendanceServiceImpl::new(
            MemoryAttendanceDao::new(),
            MemoryStaffDao::new(),
            business_dao_with(&["business003"]),
            TenantContext::new("business003").unwrap(),
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_stamps_event_time_and_staff() {
        let dao = MemoryAttendanceDao::new();
        let service = service(Arc::clone(&dao)).await;

        let created = service.create(doc! { "type": "IN" }).await.unwrap();

        assert!(created.get_str("attendance_id").unwrap().starts_with("atten"));
        assert_eq!(created.get_str("staff_id").unwrap(), "stf001");
        assert_eq!(created.get_str("business_id").unwrap(), "business003");
        assert!(created.get_datetime("date_time").is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let dao = MemoryAttendanceDao::new();
        let service = service(Arc::clone(&dao)).await;

        service.create(doc! { "attendance_id": "atten01" }).await.unwrap();
        let result = service.create(doc! { "attendance_id": "ATTEN01" }).await;

        assert!(matches!(result, Err(TesseraError::DuplicateId { .. })));
    }

    #[tokio::test]
    async fn test_update_strips_staff_scope_fields() {
        let dao = MemoryAttendanceDao::new();
        let service = service(Arc::clone(&dao)).await;

        service.create(doc! { "attendance_id": "atten01", "type": "IN" }).await.unwrap();
        service
            .update(
                "atten01",
                doc! { "staff_id": "stf999", "type": "OUT" },
            )
            .await
            .unwrap();

        let stored = dao.store().raw("atten01").unwrap();
        assert_eq!(stored.get_str("staff_id").unwrap(), "stf001");
        assert_eq!(stored.get_str("type").unwrap(), "OUT");
    }

    #[tokio::test]
    async fn test_soft_and_hard_delete() {
        let dao = MemoryAttendanceDao::new();
        let service = service(Arc::clone(&dao)).await;

        service.create(doc! { "attendance_id": "atten01" }).await.unwrap();
        service.delete("atten01", false).await.unwrap();
        assert!(dao.store().raw("atten01").unwrap().get_bool("is_deleted").unwrap());

        let result = service.delete("atten01", true).await;
        assert!(result.is_ok());
        assert!(dao.store().raw("atten01").is_none());
    }
}
