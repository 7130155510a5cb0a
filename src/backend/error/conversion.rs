/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers can return it directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Email already registered",
 *   "status": 400
 * }
 * ```
 *
 * Credential failures additionally carry `WWW-Authenticate: Bearer`.
 * Extractor rejections (bad JSON, bad form, bad query) are folded into
 * `Validation` so every error shares this body.
 */

use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::{header, HeaderValue},
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::Unauthenticated(reason) => {
                tracing::warn!("Rejected credentials: {:?}", reason)
            }
            Self::StoreUnavailable(detail) => tracing::error!("Store unavailable: {}", detail),
            Self::Internal(detail) => tracing::error!("Internal error: {}", detail),
            Self::Serialization(err) => tracing::error!("Serialization error: {}", err),
            _ => {}
        }

        let body = Json(serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        }));

        let mut response = (status, body).into_response();
        if self.is_auth_challenge() {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation("body", rejection.body_text())
    }
}

impl From<FormRejection> for BackendError {
    fn from(rejection: FormRejection) -> Self {
        Self::validation("body", rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation("query", rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation("path", rejection.body_text())
    }
}
