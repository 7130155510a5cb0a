/**
 * Login Handler
 *
 * POST /api/v1/auth/login. Accepts the OAuth2 password form
 * (`username=&password=`) or a JSON body, and answers with a bearer token.
 *
 * # Security
 *
 * - Unknown email and wrong password give the same 401
 * - Inactive accounts get a 400, but only once the password has verified
 * - Passwords are never logged
 */

use axum::{
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    response::Json,
    Form,
};

use crate::backend::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;

/// Login body, decoded as JSON or as a urlencoded form by content type
#[derive(Debug)]
pub struct LoginCredentials(pub LoginRequest);

impl<S> FromRequest<S> for LoginCredentials
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim_start().starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let Json(request) = Json::<LoginRequest>::from_request(req, state).await?;
            Ok(Self(request))
        } else {
            let Form(request) = Form::<LoginRequest>::from_request(req, state).await?;
            Ok(Self(request))
        }
    }
}

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `400 Bad Request` - inactive account, or a body missing fields
///
/// # Example Response
///
/// ```json
/// {"access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...", "token_type": "bearer"}
/// ```
pub async fn login(
    State(auth): State<AuthService>,
    LoginCredentials(request): LoginCredentials,
) -> Result<Json<TokenResponse>, BackendError> {
    tracing::info!("Login request for: {}", request.username);

    let token = auth.login(&request.username, &request.password).await?;
    Ok(Json(token))
}
