//! DAO trait definitions.
//!
//! One trait per collection. `get`/`find` return `None` on a miss; mapping
//! a miss to an error is the service layer's decision.

use async_trait::async_trait;
use bson::Document;
use tessera_core::{ListQuery, ListResult, TesseraResult};

/// Staff DAO.
#[async_trait]
pub trait StaffDao: Send + Sync {
    /// Lists staff records with filter, sort, and pagination.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets a staff record by id.
    async fn get(&self, staff_id: &str) -> TesseraResult<Option<Document>>;

    /// Finds the first staff record matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Option<Document>>;

    /// Creates a staff record.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates a staff record by id.
    async fn update(&self, staff_id: &str, data: Document) -> TesseraResult<Document>;

    /// Permanently deletes a staff record; returns the deleted count.
    async fn delete(&self, staff_id: &str) -> TesseraResult<u64>;
}

/// Attendance DAO.
#[async_trait]
pub trait AttendanceDao: Send + Sync {
    /// Lists attendance records with filter, sort, and pagination.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets an attendance record by id.
    async fn get(&self, attendance_id: &str) -> TesseraResult<Option<Document>>;

    /// Finds the first attendance record matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Option<Document>>;

    /// Creates an attendance record.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates an attendance record by id.
    async fn update(&self, attendance_id: &str, data: Document) -> TesseraResult<Document>;

    /// Permanently deletes an attendance record; returns the deleted count.
    async fn delete(&self, attendance_id: &str) -> TesseraResult<u64>;
}

/// Leave DAO.
#[async_trait]
pub trait LeaveDao: Send + Sync {
    /// Lists leave records, each enriched with staff info.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets a leave record by id.
    async fn get(&self, leave_id: &str) -> TesseraResult<Option<Document>>;

    /// Finds the first leave record matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Option<Document>>;

    /// Creates a leave record.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates a leave record by id.
    async fn update(&self, leave_id: &str, data: Document) -> TesseraResult<Document>;

    /// Permanently deletes a leave record; returns the deleted count.
    async fn delete(&self, leave_id: &str) -> TesseraResult<u64>;
}

/// Shift DAO.
#[async_trait]
pub trait ShiftDao: Send + Sync {
    /// Lists shift records with filter, sort, and pagination.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets a shift record by id.
    async fn get(&self, shift_id: &str) -> TesseraResult<Option<Document>>;

    /// Finds the first shift record matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Option<Document>>;

    /// Creates a shift record.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates a shift record by id.
    async fn update(&self, shift_id: &str, data: Document) -> TesseraResult<Document>;

    /// Permanently deletes a shift record; returns the deleted count.
    async fn delete(&self, shift_id: &str) -> TesseraResult<u64>;
}

/// Project DAO.
#[async_trait]
pub trait ProjectDao: Send + Sync {
    /// Lists project records, each enriched with client info.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets a project record by id, enriched with client info.
    async fn get(&self, project_id: &str) -> TesseraResult<Option<Document>>;

    /// Finds the first project record matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Option<Document>>;

    /// Creates a project record.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates a project record by id.
    async fn update(&self, project_id: &str, data: Document) -> TesseraResult<Document>;

    /// Permanently deletes a project record; returns the deleted count.
    async fn delete(&self, project_id: &str) -> TesseraResult<u64>;

    /// Permanently deletes every project record in the tenant scope.
    async fn delete_all(&self) -> TesseraResult<u64>;
}

/// Client DAO.
#[async_trait]
pub trait ClientDao: Send + Sync {
    /// Lists client records with filter, sort, and pagination.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets a client record by id.
    async fn get(&self, client_id: &str) -> TesseraResult<Option<Document>>;

    /// Finds the first client record matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Option<Document>>;

    /// Creates a client record.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates a client record by id.
    async fn update(&self, client_id: &str, data: Document) -> TesseraResult<Document>;

    /// Permanently deletes a client record; returns the deleted count.
    async fn delete(&self, client_id: &str) -> TesseraResult<u64>;

    /// Permanently deletes every client record in the tenant scope.
    async fn delete_all(&self) -> TesseraResult<u64>;
}

/// Hours-factor profile DAO.
#[async_trait]
pub trait HoursFactorDao: Send + Sync {
    /// Lists hours-factor profiles with filter, sort, and pagination.
    async fn list(&self, query: &ListQuery) -> TesseraResult<ListResult>;

    /// Gets an hours-factor profile by id.
    async fn get(&self, hours_factor_id: &str) -> TesseraResult<Option<Document>>;

    /// Finds the first hours-factor profile matching a caller filter.
    async fn find(&self, filter: &str) -> TesseraResult<Option<Document>>;

    /// Creates an hours-factor profile.
    async fn create(&self, data: Document) -> TesseraResult<Document>;

    /// Updates an hours-factor profile by id.
    async fn update(&self, hours_factor_id: &str, data: Document) -> TesseraResult<Document>;

    /// Permanently deletes an hours-factor profile; returns the deleted count.
    async fn delete(&self, hours_factor_id: &str) -> TesseraResult<u64>;

    /// Permanently deletes every hours-factor profile in the tenant scope.
    async fn delete_all(&self) -> TesseraResult<u64>;
}

/// Reports DAO.
#[async_trait]
pub trait ReportsDao: Send + Sync {
    /// Builds the per-staff, per-day attendance summary.
    async fn attendance_summary(&self, query: &ListQuery) -> TesseraResult<ListResult>;
}

/// Dashboard DAO.
#[async_trait]
pub trait DashboardDao: Send + Sync {
    /// Returns leave counts for the dashboard.
    async fn dashboard_data(&self) -> TesseraResult<Document>;
}

/// Business DAO over the platform tenant registry.
#[async_trait]
pub trait BusinessDao: Send + Sync {
    /// Gets a business record by id.
    async fn get(&self, business_id: &str) -> TesseraResult<Option<Document>>;
}
