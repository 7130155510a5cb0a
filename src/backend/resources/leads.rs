/**
 * Leads (CRM)
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Resource;
use crate::backend::database::indexes::LEADS;
use crate::shared::enums::LeadStatus;

pub struct Leads;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    /// Where the lead came from (web form, referral, ...)
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LeadCreate {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    #[serde(default)]
    pub status: LeadStatus,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct LeadUpdate {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub status: Option<LeadStatus>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
}

impl Resource for Leads {
    const COLLECTION: &'static str = LEADS;
    const LABEL: &'static str = "Lead";
    const FILTERS: &'static [&'static str] = &["status", "assigned_to", "source"];

    type Create = LeadCreate;
    type Update = LeadUpdate;
    type Entity = Lead;
}
