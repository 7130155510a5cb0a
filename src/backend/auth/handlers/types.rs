/**
 * Authentication Handler Types
 *
 * Request and response bodies for the auth and user endpoints. Validation
 * rules are declared with `validator` and checked before any store access.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::backend::auth::users::User;
use crate::shared::enums::UserRole;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "full_name must be 1-255 characters"))]
    pub full_name: String,
    /// Plaintext; hashed before storage (bcrypt ignores bytes past 72)
    #[validate(length(min = 6, max = 72, message = "password must be 6-72 characters"))]
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
}

/// Login request
///
/// `username` carries the email, matching the OAuth2 password form. JSON
/// bodies may name the field `email` instead.
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    #[serde(alias = "email")]
    pub username: String,
    pub password: String,
}

/// Successful login response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Self-service profile update; absent fields are left untouched
#[derive(Deserialize, Serialize, Debug, Default, Validate)]
pub struct ProfileUpdate {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 255, message = "full_name must be 1-255 characters"))]
    pub full_name: Option<String>,
    #[validate(length(min = 6, max = 72, message = "password must be 6-72 characters"))]
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.full_name.is_none() && self.password.is_none()
    }
}
