/**
 * User Listing Handler
 *
 * GET /api/v1/users. Lists accounts in creation order, without hashes.
 */

use std::collections::HashMap;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::service::AuthService;
use crate::backend::auth::users::list_users as load_users;
use crate::backend::error::BackendError;
use crate::backend::resources::ListQuery;

pub async fn list_users(
    State(auth): State<AuthService>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<Vec<UserResponse>>, BackendError> {
    let Query(params) = params?;
    let query = ListQuery::parse(&params, &[])?;

    let users = load_users(auth.dal(), query.page).await;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
