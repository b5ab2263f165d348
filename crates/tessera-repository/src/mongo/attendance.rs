//! Attendance DAO (MongoDB).
//!
//! Attendance is the one staff-scoped collection with a find-based list:
//! clock-in/out rows are flat and need no joins (the reports DAO does the
//! enriched reading).

use crate::dao::AttendanceDao;
use crate::handle::DatabaseHandle;
use crate::mongo::common::{self, execute_find_list};
use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::Collection;
use std::sync::Arc;
use tessera_core::fields::{self, coll};
use tessera_core::{ListQuery, ListResult, TenantContext, TesseraResult};
use tracing::debug;

/// MongoDB attendance DAO.
#[derive(Debug, Clone)]
pub struct MongoAttendanceDao {
    handle: Arc<DatabaseHandle>,
    ctx: TenantContext,
}

impl MongoAttendanceDao {
    /// Creates an attendance DAO scoped to the given tenant (and staff
    /// member, when the context carries one).
    #[must_use]
    pub fn new(handle: Arc<DatabaseHandle>, ctx: TenantContext) -> Self {
        Self { handle, ctx }
    }

    fn collection(&self) -> Collection<Document> {
        self.handle.collection(coll::HR_ATTENDANCES)
    }
}

#[async_trait]
impl AttendanceDao for MongoAttendanceDao {
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!(
            "Listing attendance records for business {}",
            self.ctx.business_id()
        );

        let caller = common::parse_filter(query.filter.as_deref());
        let scoped = common::staff_scope(caller, &self.ctx);
        let base = common::staff_scope(Document::new(), &self.ctx);

        execute_find_list(&self.collection(), scoped, base, query).await
    }

    async fn get(&self, attendance_id: &str) -> TesseraResult<Option<Document>> {
        debug!("Getting attendance record {}", attendance_id);

        let filter = common::keyed_scope(fields::ATTENDANCE_ID, attendance_id, &self.ctx);
        let row = self.collection().find_one(filter).await?;
        Ok(row.map(common::amend_for_get))
    }

    async fn find(&self, filter: &str) -> TesseraResult<Option<Document>> {
        debug!("Finding attendance record by filter");

        let scoped = common::tenant_scope(common::parse_filter(Some(filter)), &self.ctx);
        let row = self.collection().find_one(scoped).await?;
        Ok(row.map(common::amend_for_get))
    }

    async fn create(&self, data: Document) -> TesseraResult<Document> {
        debug!("Creating attendance record");

        let data = common::stamp_for_create(data);
        self.collection().insert_one(&data).await?;
        Ok(data)
    }

    async fn update(&self, attendance_id: &str, data: Document) -> TesseraResult<Document> {
        debug!("Updating attendance record {}", attendance_id);

        let data = common::stamp_for_update(data);
        let filter = common::keyed(fields::ATTENDANCE_ID, attendance_id, &self.ctx);
        self.collection()
            .update_one(filter, doc! { "$set": data.clone() })
            .await?;
        Ok(data)
    }

    async fn delete(&self, attendance_id: &str) -> TesseraResult<u64> {
        debug!("Deleting attendance record {}", attendance_id);

        let filter = common::keyed(fields::ATTENDANCE_ID, attendance_id, &self.ctx);
        let result = self.collection().delete_one(filter).await?;
        Ok(result.deleted_count)
    }
}
