//! Index declarations applied at startup.

use super::adapter::IndexSpec;

pub const USERS: &str = "users";
pub const CUSTOMERS: &str = "customers";
pub const LEADS: &str = "leads";
pub const DEALS: &str = "deals";
pub const EMPLOYEES: &str = "employees";
pub const DEPARTMENTS: &str = "departments";
pub const ATTENDANCE: &str = "attendance";
pub const LEAVE_REQUESTS: &str = "leave_requests";

pub const DATABASE_INDEXES: &[IndexSpec] = &[
    IndexSpec::unique(USERS, &["email"]),
    IndexSpec::non_unique(USERS, &["role"]),
    IndexSpec::non_unique(CUSTOMERS, &["email"]),
    IndexSpec::non_unique(CUSTOMERS, &["status"]),
    IndexSpec::non_unique(CUSTOMERS, &["assigned_to"]),
    IndexSpec::non_unique(LEADS, &["email"]),
    IndexSpec::non_unique(LEADS, &["status"]),
    IndexSpec::non_unique(LEADS, &["assigned_to"]),
    IndexSpec::non_unique(DEALS, &["customer_id"]),
    IndexSpec::non_unique(DEALS, &["stage"]),
    IndexSpec::non_unique(DEALS, &["assigned_to"]),
    IndexSpec::unique(EMPLOYEES, &["employee_id"]),
    IndexSpec::unique(EMPLOYEES, &["email"]),
    IndexSpec::non_unique(EMPLOYEES, &["department_id"]),
    IndexSpec::non_unique(EMPLOYEES, &["manager_id"]),
    IndexSpec::unique(DEPARTMENTS, &["name"]),
    IndexSpec::unique(ATTENDANCE, &["employee_id", "date"]),
    IndexSpec::non_unique(LEAVE_REQUESTS, &["employee_id"]),
    IndexSpec::non_unique(LEAVE_REQUESTS, &["status"]),
];
