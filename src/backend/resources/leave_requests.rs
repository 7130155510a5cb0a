/**
 * Leave Requests (HRMS)
 *
 * `total_days` counts both ends of the range. A reviewer decision
 * (approved or rejected) records who made it and when.
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::Resource;
use crate::backend::auth::users::User;
use crate::backend::database::indexes::LEAVE_REQUESTS;
use crate::backend::database::Document;
use crate::backend::error::BackendError;
use crate::shared::enums::{LeaveStatus, LeaveType};

pub struct LeaveRequests;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveRequest {
    pub id: String,
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: LeaveStatus,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LeaveRequestCreate {
    #[validate(length(min = 1, message = "employee_id is required"))]
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct LeaveRequestUpdate {
    pub status: Option<LeaveStatus>,
    pub leave_type: Option<LeaveType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

/// Inclusive day count of a leave range
pub fn total_days(start: NaiveDate, end: NaiveDate) -> Result<i64, BackendError> {
    if end < start {
        return Err(BackendError::validation(
            "end_date",
            "end_date must not be before start_date",
        ));
    }
    Ok((end - start).num_days() + 1)
}

impl Resource for LeaveRequests {
    const COLLECTION: &'static str = LEAVE_REQUESTS;
    const LABEL: &'static str = "Leave request";
    const FILTERS: &'static [&'static str] = &["employee_id", "status", "leave_type"];

    type Create = LeaveRequestCreate;
    type Update = LeaveRequestUpdate;
    type Entity = LeaveRequest;

    fn on_create(
        input: &LeaveRequestCreate,
        _actor: &User,
        doc: &mut Document,
    ) -> Result<(), BackendError> {
        let days = total_days(input.start_date, input.end_date)?;
        doc.insert("total_days".to_string(), Value::from(days));
        doc.insert(
            "status".to_string(),
            serde_json::to_value(LeaveStatus::Pending)?,
        );
        Ok(())
    }

    fn on_update(
        update: &LeaveRequestUpdate,
        current: &LeaveRequest,
        actor: &User,
        changes: &mut Document,
    ) -> Result<(), BackendError> {
        if update.start_date.is_some() || update.end_date.is_some() {
            let start = update.start_date.unwrap_or(current.start_date);
            let end = update.end_date.unwrap_or(current.end_date);
            changes.insert("total_days".to_string(), Value::from(total_days(start, end)?));
        }

        if update.status.is_some_and(LeaveStatus::is_decision) {
            changes.insert("approved_by".to_string(), Value::String(actor.id.clone()));
            changes.insert(
                "approved_at".to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
        }
        Ok(())
    }
}
