/**
 * Employees (HRMS)
 *
 * `employee_id` (the HR badge number) and `email` are unique across the
 * collection; the store enforces both. Emails are stored trimmed and
 * lowercased, like account emails, so the email index ignores case.
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::Resource;
use crate::backend::auth::users::{normalize_email, User};
use crate::backend::database::indexes::EMPLOYEES;
use crate::backend::database::Document;
use crate::backend::error::BackendError;
use crate::shared::enums::EmployeeStatus;

pub struct Employees;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: String,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
    pub position: String,
    pub hire_date: NaiveDate,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub manager_id: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(length(min = 1, max = 50, message = "employee_id must be 1-50 characters"))]
    pub employee_id: String,
    #[validate(length(min = 1, max = 255, message = "full_name must be 1-255 characters"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
    pub department_id: Option<String>,
    #[validate(length(min = 1, max = 255, message = "position must be 1-255 characters"))]
    pub position: String,
    pub hire_date: NaiveDate,
    #[validate(range(min = 0.0, message = "salary must not be negative"))]
    pub salary: Option<f64>,
    #[serde(default)]
    pub status: EmployeeStatus,
    pub manager_id: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, max = 255, message = "full_name must be 1-255 characters"))]
    pub full_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department_id: Option<String>,
    #[validate(length(min = 1, max = 255, message = "position must be 1-255 characters"))]
    pub position: Option<String>,
    #[validate(range(min = 0.0, message = "salary must not be negative"))]
    pub salary: Option<f64>,
    pub status: Option<EmployeeStatus>,
    pub manager_id: Option<String>,
}

impl Resource for Employees {
    const COLLECTION: &'static str = EMPLOYEES;
    const LABEL: &'static str = "Employee";
    const FILTERS: &'static [&'static str] = &["status", "department_id", "manager_id"];

    type Create = EmployeeCreate;
    type Update = EmployeeUpdate;
    type Entity = Employee;

    fn on_create(input: &EmployeeCreate, _actor: &User, doc: &mut Document) -> Result<(), BackendError> {
        store_email(doc, &input.email);
        Ok(())
    }

    fn on_update(
        update: &EmployeeUpdate,
        _current: &Employee,
        _actor: &User,
        changes: &mut Document,
    ) -> Result<(), BackendError> {
        if let Some(email) = &update.email {
            store_email(changes, email);
        }
        Ok(())
    }
}

fn store_email(doc: &mut Document, email: &str) {
    doc.insert("email".to_string(), Value::String(normalize_email(email)));
}
