/**
 * Authentication Middleware
 *
 * Guards protected routes. The bearer token from the `Authorization` header
 * is resolved to an account through `AuthService`, and the account is placed
 * in the request extensions for handlers to pick up with `AuthUser`.
 *
 * No role checks happen here.
 */

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::service::AuthService;
use crate::backend::auth::users::User;
use crate::backend::error::{BackendError, UnauthenticatedReason};

/// Account resolved by the middleware, stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub User);

/// Pull the token out of `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(BackendError::Unauthenticated(UnauthenticatedReason::MissingHeader))?;

    let malformed = || BackendError::Unauthenticated(UnauthenticatedReason::MalformedHeader);
    let value = value.to_str().map_err(|_| malformed())?;
    let (scheme, token) = value.trim().split_once(' ').ok_or_else(malformed)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(malformed());
    }
    Ok(token)
}

/// Authentication middleware
///
/// Applied with `from_fn_with_state` as a `route_layer`. Short-circuits with
/// 401 and `WWW-Authenticate: Bearer` when the token is missing, malformed,
/// expired, forged, or names an account that no longer exists. A store
/// outage during the lookup is 503.
pub async fn auth_middleware(
    State(auth): State<AuthService>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers())?.to_owned();
    let user = auth.resolve_current_user(&token).await?;

    tracing::debug!("Authenticated request from user {}", user.id);
    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated account
///
/// Reads what the middleware stored. On routes without the middleware it
/// resolves the header itself, so it is never silently anonymous.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(AuthenticatedUser(user)) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(AuthUser(user.clone()));
        }

        let auth = AuthService::from_ref(state);
        let token = bearer_token(&parts.headers)?.to_owned();
        let user = auth.resolve_current_user(&token).await?;
        Ok(AuthUser(user))
    }
}
