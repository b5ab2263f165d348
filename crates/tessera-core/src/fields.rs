//! Collection and field names shared across DAOs.

/// Collection names.
pub mod coll {
    pub const HR_STAFFS: &str = "hr_staffs";
    pub const HR_ATTENDANCES: &str = "hr_attendances";
    pub const HR_LEAVES: &str = "hr_leaves";
    pub const HR_SHIFTS: &str = "hr_shifts";
    pub const HR_PROJECTS: &str = "hr_projects";
    pub const HR_CLIENTS: &str = "hr_clients";
    pub const HR_HOURS_FACTOR_PROFILES: &str = "hr_hours_factor_profiles";
    pub const HR_WORK_LOCATIONS: &str = "hr_work_locations";

    // Platform collections referenced by joins and tenant validation
    pub const APP_BUSINESSES: &str = "app_businesses";
    pub const APP_USERS: &str = "app_users";
}

// Common fields carried by every document
pub const DOC_ID: &str = "_id";
pub const BUSINESS_ID: &str = "business_id";
pub const IS_DELETED: &str = "is_deleted";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

// Staff
pub const STAFF_ID: &str = "staff_id";
pub const STAFF_INFO: &str = "staff_info";

// Attendance; `type` holds "IN" or "OUT"
pub const ATTENDANCE_ID: &str = "attendance_id";
pub const ATTENDANCE_TYPE: &str = "type";
pub const DATE_TIME: &str = "date_time";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const TYPE_OF_WORK: &str = "type_of_work";
pub const WORK_LOCATION: &str = "work_location";

// Leave
pub const LEAVE_ID: &str = "leave_id";
pub const LEAVE_FROM: &str = "leave_from";
pub const LEAVE_TO: &str = "leave_to";
pub const LEAVE_DESCRIPTION: &str = "leave_description";
pub const LEAVE_APPROVED: &str = "leave_approved";
pub const LEAVE_TYPE: &str = "leave_type";

// Shift
pub const SHIFT_ID: &str = "shift_id";
pub const SHIFT_FROM: &str = "shift_from";
pub const SHIFT_TO: &str = "shift_to";
pub const SHIFT_DESCRIPTION: &str = "shift_description";
pub const SHIFT_INFO: &str = "shift_info";

// Project
pub const PROJECT_ID: &str = "project_id";
pub const PROJECT_INFO: &str = "project_info";

// Client
pub const CLIENT_ID: &str = "client_id";
pub const CLIENT_INFO: &str = "client_info";

// Hours factor profile
pub const HOURS_FACTOR_ID: &str = "hours_factor_id";

// Work location
pub const WORK_LOCATION_ID: &str = "work_location_id";
pub const WORK_LOCATION_INFO: &str = "work_location_info";

// Platform
pub const APP_USER_ID: &str = "app_user_id";
pub const APP_USER_PASSWORD: &str = "password";

// Reports
pub const FOR_DATE: &str = "for_date";
