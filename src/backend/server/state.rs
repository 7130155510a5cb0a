/**
 * Application State
 *
 * `AppState` is cloned into every request. It holds the settings, the data
 * access layer and the auth service; handlers extract only the part they
 * need through `FromRef`.
 *
 * # Thread Safety
 *
 * Everything inside is either immutable after startup or an `Arc` around a
 * thread-safe store, so cloning is cheap and no locking happens here.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::service::AuthService;
use crate::backend::database::Dal;
use crate::shared::config::{ConfigError, Settings};

#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub dal: Dal,
    pub auth: AuthService,
}

impl AppState {
    /// Build the state around an already-chosen store
    pub fn new(settings: Settings, dal: Dal) -> Result<Self, ConfigError> {
        let auth = AuthService::from_settings(dal.clone(), &settings)?;
        Ok(Self {
            settings: Arc::new(settings),
            dal,
            auth,
        })
    }
}

impl FromRef<AppState> for Dal {
    fn from_ref(state: &AppState) -> Self {
        state.dal.clone()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<Settings> {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}
