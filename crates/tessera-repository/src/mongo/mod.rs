//! MongoDB DAO implementations.

pub mod attendance;
pub mod business;
pub mod client;
pub mod common;
pub mod dashboard;
pub mod hours_factor;
pub mod leave;
pub mod pipeline;
pub mod project;
pub mod reports;
pub mod shift;
pub mod staff;

pub use attendance::MongoAttendanceDao;
pub use business::MongoBusinessDao;
pub use client::MongoClientDao;
pub use dashboard::MongoDashboardDao;
pub use hours_factor::MongoHoursFactorDao;
pub use leave::MongoLeaveDao;
pub use pipeline::{ListPipeline, LookupSpec};
pub use project::MongoProjectDao;
pub use reports::MongoReportsDao;
pub use shift::MongoShiftDao;
pub use staff::MongoStaffDao;
