/**
 * Register Handler
 *
 * POST /api/v1/auth/register. Creates an account and returns it without the
 * password hash. No token is issued; clients log in afterwards.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - malformed body or email already registered
/// * `503 Service Unavailable` - the store cannot take the write
///
/// # Example Request
///
/// ```http
/// POST /api/v1/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {"email": "a@x.com", "full_name": "A", "password": "secret123"}
/// ```
pub async fn register(
    State(auth): State<AuthService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, BackendError> {
    let Json(request) = payload?;
    tracing::info!("Registration request for: {}", request.email);

    let user = auth.register(request).await?;
    Ok(Json(user))
}
