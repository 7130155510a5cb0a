/**
 * Customers (CRM)
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Resource;
use crate::backend::database::indexes::CUSTOMERS;
use crate::shared::enums::CustomerStatus;

pub struct Customers;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub company: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub status: CustomerStatus,
    #[serde(default)]
    pub billing_address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// User responsible for the account
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CustomerCreate {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 255, message = "company must be 1-255 characters"))]
    pub company: String,
    pub industry: Option<String>,
    #[serde(default)]
    pub status: CustomerStatus,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct CustomerUpdate {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 255, message = "company must be 1-255 characters"))]
    pub company: Option<String>,
    pub industry: Option<String>,
    pub status: Option<CustomerStatus>,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
}

impl Resource for Customers {
    const COLLECTION: &'static str = CUSTOMERS;
    const LABEL: &'static str = "Customer";
    const FILTERS: &'static [&'static str] = &["status", "assigned_to", "industry"];

    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Entity = Customer;
}
