/**
 * Attendance (HRMS)
 *
 * One record per employee per day, enforced by a unique index on
 * `(employee_id, date)`. `date` defaults to the check-in date and
 * `total_hours` is derived whenever a check-out is known.
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use validator::Validate;

use super::Resource;
use crate::backend::auth::users::User;
use crate::backend::database::indexes::ATTENDANCE;
use crate::backend::database::Document;
use crate::backend::error::BackendError;
use crate::shared::enums::AttendanceStatus;

pub struct Attendance;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub check_in: DateTime<Utc>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_hours: Option<f64>,
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AttendanceCreate {
    #[validate(length(min = 1, message = "employee_id is required"))]
    pub employee_id: String,
    /// Defaults to the check-in date
    pub date: Option<NaiveDate>,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct AttendanceUpdate {
    pub check_out: Option<DateTime<Utc>>,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

/// Hours between check-in and check-out, rounded to two decimals
pub fn hours_worked(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> Result<f64, BackendError> {
    if check_out < check_in {
        return Err(BackendError::validation(
            "check_out",
            "check_out must not be before check_in",
        ));
    }
    let hours = (check_out - check_in).num_seconds() as f64 / 3600.0;
    Ok((hours * 100.0).round() / 100.0)
}

fn insert_hours(doc: &mut Document, hours: f64) {
    if let Some(number) = Number::from_f64(hours) {
        doc.insert("total_hours".to_string(), Value::Number(number));
    }
}

impl Resource for Attendance {
    const COLLECTION: &'static str = ATTENDANCE;
    const LABEL: &'static str = "Attendance record";
    const FILTERS: &'static [&'static str] = &["employee_id", "date", "status"];

    type Create = AttendanceCreate;
    type Update = AttendanceUpdate;
    type Entity = AttendanceRecord;

    fn on_create(
        input: &AttendanceCreate,
        _actor: &User,
        doc: &mut Document,
    ) -> Result<(), BackendError> {
        let date = input.date.unwrap_or_else(|| input.check_in.date_naive());
        doc.insert("date".to_string(), Value::String(date.to_string()));

        if let Some(check_out) = input.check_out {
            insert_hours(doc, hours_worked(input.check_in, check_out)?);
        }
        Ok(())
    }

    fn on_update(
        update: &AttendanceUpdate,
        current: &AttendanceRecord,
        _actor: &User,
        changes: &mut Document,
    ) -> Result<(), BackendError> {
        if let Some(check_out) = update.check_out {
            insert_hours(changes, hours_worked(current.check_in, check_out)?);
        }
        Ok(())
    }
}
