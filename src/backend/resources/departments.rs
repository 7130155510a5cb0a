/**
 * Departments (HRMS)
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Resource;
use crate::backend::database::indexes::DEPARTMENTS;

pub struct Departments;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Department {
    pub id: String,
    /// Unique across departments
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manager_id: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct DepartmentCreate {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub manager_id: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct DepartmentUpdate {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub manager_id: Option<String>,
}

impl Resource for Departments {
    const COLLECTION: &'static str = DEPARTMENTS;
    const LABEL: &'static str = "Department";
    const FILTERS: &'static [&'static str] = &["manager_id"];

    type Create = DepartmentCreate;
    type Update = DepartmentUpdate;
    type Entity = Department;
}
