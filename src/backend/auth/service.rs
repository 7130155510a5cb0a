/**
 * Authentication Service
 *
 * Registration, login and bearer-token resolution on top of the DAL, the
 * password hasher and the token codec. Handlers and the auth middleware hold
 * one `AuthService` each (it is cheap to clone) and never touch bcrypt or
 * jsonwebtoken directly.
 *
 * # Failure Semantics
 *
 * - An unknown email and a wrong password are indistinguishable to the
 *   caller: both are `InvalidCredentials`.
 * - The active flag is only consulted after the password verifies, so an
 *   inactive account does not reveal itself to someone without the password.
 * - An unknown email still pays for one bcrypt verification, against a
 *   hash made at startup, so response time does not reveal which case hit.
 * - Every token failure becomes `Unauthenticated`; the reason is logged.
 * - A lookup miss while the store is down is `StoreUnavailable`, not an
 *   authentication failure.
 */

use std::sync::Arc;

use serde_json::Value;
use validator::Validate;

use crate::backend::auth::handlers::types::{
    ProfileUpdate, RegisterRequest, TokenResponse, UserResponse,
};
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenCodec;
use crate::backend::auth::users::{
    create_user, get_user_by_email, get_user_by_id, normalize_email, touch_last_login,
    update_user, NewUser, User,
};
use crate::backend::database::{Dal, DalError, Document};
use crate::backend::error::{BackendError, UnauthenticatedReason};
use crate::shared::config::{ConfigError, Settings};

const DUMMY_PASSWORD: &str = "no-such-account";

#[derive(Debug, Clone)]
pub struct AuthService {
    dal: Dal,
    hasher: PasswordHasher,
    tokens: TokenCodec,
    /// Verified against when the email is unknown
    dummy_hash: Arc<str>,
}

impl AuthService {
    pub fn new(dal: Dal, hasher: PasswordHasher, tokens: TokenCodec) -> Self {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD).unwrap_or_default();
        Self {
            dal,
            hasher,
            tokens,
            dummy_hash: dummy_hash.into(),
        }
    }

    /// Build the service from validated settings
    pub fn from_settings(dal: Dal, settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self::new(
            dal,
            PasswordHasher::new(settings.bcrypt_cost),
            TokenCodec::from_settings(settings)?,
        ))
    }

    pub fn dal(&self) -> &Dal {
        &self.dal
    }

    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }

    /// `fallback` when the store answers, `StoreUnavailable` when it does not
    ///
    /// DAL reads report an outage as a plain miss; this tells the two apart.
    async fn miss(&self, fallback: BackendError) -> BackendError {
        if self.dal.is_connected().await {
            fallback
        } else {
            BackendError::StoreUnavailable("user lookup failed".to_string())
        }
    }

    /// Create a new account
    ///
    /// The pre-check gives a clean error for the common case; the unique
    /// index on `users.email` settles concurrent registrations.
    ///
    /// # Errors
    /// * `Validation` - malformed email, empty name, bad password length
    /// * `EmailAlreadyRegistered` - the normalized email is taken
    /// * `StoreUnavailable` - the write could not reach the store
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, BackendError> {
        request.validate()?;

        let email = normalize_email(&request.email);
        if get_user_by_email(&self.dal, &email).await.is_some() {
            tracing::warn!("Registration rejected, email already registered: {}", email);
            return Err(BackendError::EmailAlreadyRegistered);
        }

        let hashed_password = self.hasher.hash(&request.password)?;

        let user = create_user(
            &self.dal,
            NewUser {
                email,
                full_name: request.full_name.trim().to_string(),
                hashed_password,
                role: request.role,
                is_active: true,
                last_login: None,
            },
        )
        .await
        .map_err(|e| match e {
            DalError::DuplicateKey { .. } => BackendError::EmailAlreadyRegistered,
            other => other.into(),
        })?;

        tracing::info!("User registered: {} ({})", user.id, user.email);
        Ok(user.into())
    }

    /// Check an email/password pair and return the account
    ///
    /// Does not touch `last_login`; see [`AuthService::login`].
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, BackendError> {
        let user = match get_user_by_email(&self.dal, email).await {
            Some(user) => user,
            None => {
                self.hasher.verify(password, &self.dummy_hash);
                tracing::warn!("Login failed, unknown email");
                return Err(self.miss(BackendError::InvalidCredentials).await);
            }
        };

        if !self.hasher.verify(password, &user.hashed_password) {
            tracing::warn!("Login failed, wrong password for user {}", user.id);
            return Err(BackendError::InvalidCredentials);
        }

        if !user.is_active {
            tracing::warn!("Login refused for inactive user {}", user.id);
            return Err(BackendError::AccountInactive);
        }

        Ok(user)
    }

    /// Authenticate and issue an access token
    ///
    /// The token's subject is the user id.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, BackendError> {
        let user = self.authenticate(email, password).await?;

        touch_last_login(&self.dal, &user.id).await?;
        let token = self.tokens.issue(&user.id, None)?;

        tracing::info!("User logged in: {} ({})", user.id, user.email);
        Ok(TokenResponse::bearer(token))
    }

    /// Resolve a bearer token to the account it was issued for
    ///
    /// Inactive accounts still resolve; only login checks the flag.
    pub async fn resolve_current_user(&self, token: &str) -> Result<User, BackendError> {
        let subject = self.tokens.decode(token).map_err(|e| {
            tracing::debug!("Bearer token rejected: {}", e);
            BackendError::from(e)
        })?;

        match get_user_by_id(&self.dal, &subject).await {
            Some(user) => Ok(user),
            None => {
                tracing::debug!("Bearer token subject {} has no account", subject);
                Err(self
                    .miss(BackendError::Unauthenticated(UnauthenticatedReason::UnknownSubject))
                    .await)
            }
        }
    }

    /// Apply a self-service profile update and return the stored result
    ///
    /// # Errors
    /// * `NoFieldsToUpdate` - nothing was supplied
    /// * `EmailAlreadyRegistered` - the new email belongs to someone else
    pub async fn update_profile(
        &self,
        user: &User,
        update: ProfileUpdate,
    ) -> Result<UserResponse, BackendError> {
        update.validate()?;
        if update.is_empty() {
            return Err(BackendError::NoFieldsToUpdate);
        }

        let mut changes = Document::new();

        if let Some(email) = update.email {
            let email = normalize_email(&email);
            if email != user.email {
                if get_user_by_email(&self.dal, &email).await.is_some() {
                    return Err(BackendError::EmailAlreadyRegistered);
                }
                changes.insert("email".to_string(), Value::String(email));
            }
        }
        if let Some(full_name) = update.full_name {
            changes.insert(
                "full_name".to_string(),
                Value::String(full_name.trim().to_string()),
            );
        }
        if let Some(password) = update.password {
            changes.insert(
                "hashed_password".to_string(),
                Value::String(self.hasher.hash(&password)?),
            );
        }

        if !changes.is_empty() {
            let updated = update_user(&self.dal, &user.id, changes)
                .await
                .map_err(|e| match e {
                    DalError::DuplicateKey { .. } => BackendError::EmailAlreadyRegistered,
                    other => other.into(),
                })?;
            if !updated {
                return Err(BackendError::NotFound { resource: "User" });
            }
            tracing::info!("Profile updated for user {}", user.id);
        }

        get_user_by_id(&self.dal, &user.id)
            .await
            .map(UserResponse::from)
            .ok_or(BackendError::NotFound { resource: "User" })
    }
}
