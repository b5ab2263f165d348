//! # Tessera Service
//!
//! Tenant-scoped HR services. Every service validates its
//! [`TenantContext`](tessera_core::TenantContext) at construction and then
//! delegates to a per-entity DAO, returning loosely-typed
//! [`Document`](bson::Document) rows.

pub mod attendance;
pub mod client;
pub mod dashboard;
pub mod hours_factor;
pub mod leave;
pub mod project;
pub mod reports;
pub mod shift;
pub mod staff;

mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use attendance::{AttendanceService, AttendanceServiceImpl};
pub use client::{ClientService, ClientServiceImpl};
pub use dashboard::{DashboardService, DashboardServiceImpl};
pub use hours_factor::{HoursFactorService, HoursFactorServiceImpl};
pub use leave::{LeaveService, LeaveServiceImpl};
pub use project::{ProjectService, ProjectServiceImpl};
pub use reports::{ReportsService, ReportsServiceImpl};
pub use shift::{ShiftService, ShiftServiceImpl};
pub use staff::{StaffService, StaffServiceImpl};
