/**
 * User Model and Database Operations
 *
 * Users live in the `users` collection. Emails are stored trimmed and
 * lowercased, which makes the unique index on `email` case-insensitive.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::database::indexes::USERS;
use crate::backend::database::{Dal, DalError, Document, Filter, Page};
use crate::shared::enums::UserRole;

/// User struct as stored, including the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    /// bcrypt hash; never leaves the server
    pub hashed_password: String,
    #[serde(default)]
    pub role: UserRole,
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written when a user is created
#[derive(Debug, Serialize)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub hashed_password: String,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
}

/// Canonical form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Create a new user
///
/// # Returns
/// The stored user, or `DuplicateKey` if the email is taken
pub async fn create_user(dal: &Dal, new_user: NewUser) -> Result<User, DalError> {
    let id = dal.insert_entity(USERS, &new_user).await?;
    dal.get_entity(USERS, &id)
        .await
        .ok_or_else(|| DalError::StoreUnavailable(format!("user {} vanished after insert", id)))
}

/// Get user by email
pub async fn get_user_by_email(dal: &Dal, email: &str) -> Option<User> {
    dal.find_one_entity(USERS, &Filter::new().eq("email", normalize_email(email)))
        .await
}

/// Get user by ID
pub async fn get_user_by_id(dal: &Dal, id: &str) -> Option<User> {
    dal.get_entity(USERS, id).await
}

/// List users in creation order
pub async fn list_users(dal: &Dal, page: Page) -> Vec<User> {
    dal.find_many_entities(USERS, &Filter::new(), page).await
}

/// Record a successful login
pub async fn touch_last_login(dal: &Dal, id: &str) -> Result<bool, DalError> {
    let mut changes = Document::new();
    changes.insert(
        "last_login".to_string(),
        Value::String(Utc::now().to_rfc3339()),
    );
    dal.update_by_id(USERS, id, changes).await
}

/// Overwrite selected user fields
pub async fn update_user(dal: &Dal, id: &str, changes: Document) -> Result<bool, DalError> {
    dal.update_by_id(USERS, id, changes).await
}

/// Flip the active flag; used by administration tooling and tests
pub async fn set_user_active(dal: &Dal, id: &str, active: bool) -> Result<bool, DalError> {
    let mut changes = Document::new();
    changes.insert("is_active".to_string(), Value::Bool(active));
    dal.update_by_id(USERS, id, changes).await
}
