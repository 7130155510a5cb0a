/**
 * Deals (CRM)
 *
 * Moving a deal to a closed stage stamps `actual_close_date` with today's
 * date unless the client supplied one.
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::Resource;
use crate::backend::auth::users::User;
use crate::backend::database::indexes::DEALS;
use crate::backend::database::Document;
use crate::backend::error::BackendError;
use crate::shared::enums::DealStage;

pub struct Deals;

fn default_probability() -> u8 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deal {
    pub id: String,
    pub name: String,
    pub customer_id: String,
    #[serde(default)]
    pub stage: DealStage,
    pub value: f64,
    /// Percent chance of closing, 0-100
    #[serde(default = "default_probability")]
    pub probability: u8,
    #[serde(default)]
    pub expected_close_date: Option<NaiveDate>,
    #[serde(default)]
    pub actual_close_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub next_step: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct DealCreate {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "customer_id is required"))]
    pub customer_id: String,
    #[serde(default)]
    pub stage: DealStage,
    #[validate(range(min = 0.0, message = "value must not be negative"))]
    pub value: f64,
    #[serde(default = "default_probability")]
    #[validate(range(max = 100, message = "probability must be 0-100"))]
    pub probability: u8,
    pub expected_close_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub next_step: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct DealUpdate {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    pub stage: Option<DealStage>,
    #[validate(range(min = 0.0, message = "value must not be negative"))]
    pub value: Option<f64>,
    #[validate(range(max = 100, message = "probability must be 0-100"))]
    pub probability: Option<u8>,
    pub expected_close_date: Option<NaiveDate>,
    pub actual_close_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub next_step: Option<String>,
    pub assigned_to: Option<String>,
}

impl Resource for Deals {
    const COLLECTION: &'static str = DEALS;
    const LABEL: &'static str = "Deal";
    const FILTERS: &'static [&'static str] = &["stage", "customer_id", "assigned_to"];

    type Create = DealCreate;
    type Update = DealUpdate;
    type Entity = Deal;

    fn on_create(input: &DealCreate, _actor: &User, doc: &mut Document) -> Result<(), BackendError> {
        if input.stage.is_closed() {
            stamp_close_date(doc);
        }
        Ok(())
    }

    fn on_update(
        update: &DealUpdate,
        current: &Deal,
        _actor: &User,
        changes: &mut Document,
    ) -> Result<(), BackendError> {
        let closing = update.stage.is_some_and(DealStage::is_closed) && !current.stage.is_closed();
        if closing && update.actual_close_date.is_none() {
            stamp_close_date(changes);
        }
        Ok(())
    }
}

fn stamp_close_date(doc: &mut Document) {
    doc.insert(
        "actual_close_date".to_string(),
        Value::String(Utc::now().date_naive().to_string()),
    );
}
