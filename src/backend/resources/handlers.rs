/**
 * Generic Resource Handlers
 *
 * One implementation of list/get/create/update/delete shared by every
 * `Resource`. Reads degrade the way the DAL does (an unavailable store lists
 * as empty); single-record misses are reported as 503 rather than 404 when
 * the store is down, so clients can tell the two apart.
 */

use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::HeaderName,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use validator::Validate;

use super::{ListQuery, Resource};
use crate::backend::database::{record::to_document, Dal, Document, Record};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Serialize a request body, dropping absent fields
fn supplied_fields<T: serde::Serialize>(value: &T) -> Result<Document, BackendError> {
    let mut doc = to_document(value)?;
    doc.retain(|_, v| !v.is_null());
    Ok(doc)
}

async fn missing<R: Resource>(dal: &Dal) -> BackendError {
    if dal.is_connected().await {
        BackendError::NotFound { resource: R::LABEL }
    } else {
        BackendError::StoreUnavailable(format!("{} lookup failed", R::COLLECTION))
    }
}

async fn fetch<R: Resource>(dal: &Dal, id: &str) -> Result<R::Entity, BackendError> {
    match dal.get_entity::<R::Entity>(R::COLLECTION, id).await {
        Some(entity) => Ok(entity),
        None => Err(missing::<R>(dal).await),
    }
}

/// Decode a page of records, returning the entities and how many failed
fn decode_page<R: Resource>(records: Vec<Record>) -> (Vec<R::Entity>, usize) {
    let mut dropped = 0;
    let items = records
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            match record.into_entity::<R::Entity>() {
                Ok(entity) => Some(entity),
                Err(e) => {
                    tracing::error!("{} {} does not decode: {}", R::LABEL, id, e);
                    dropped += 1;
                    None
                }
            }
        })
        .collect();
    (items, dropped)
}

/// GET /api/v1/<r>
pub async fn list<R: Resource>(
    State(dal): State<Dal>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Response, BackendError> {
    let Query(params) = params?;
    let query = ListQuery::parse(&params, R::FILTERS)?;

    let records = dal.find_many(R::COLLECTION, &query.filter, query.page).await;
    let (items, dropped) = decode_page::<R>(records);
    let total = dal.count(R::COLLECTION, &query.filter).await;
    if dropped > 0 {
        tracing::warn!(
            "Listed {} page omits {} undecodable record(s); X-Total-Count {} still includes them",
            R::COLLECTION,
            dropped,
            total
        );
    }

    Ok(([(TOTAL_COUNT_HEADER, total.to_string())], Json(items)).into_response())
}

/// GET /api/v1/<r>/{id}
pub async fn get<R: Resource>(
    State(dal): State<Dal>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<R::Entity>, BackendError> {
    let Path(id) = id?;
    fetch::<R>(&dal, &id).await.map(Json)
}

/// POST /api/v1/<r>
pub async fn create<R: Resource>(
    State(dal): State<Dal>,
    AuthUser(actor): AuthUser,
    payload: Result<Json<R::Create>, JsonRejection>,
) -> Result<Json<R::Entity>, BackendError> {
    let Json(input) = payload?;
    input.validate()?;

    let mut doc = supplied_fields(&input)?;
    doc.insert("created_by".to_string(), Value::String(actor.id.clone()));
    R::on_create(&input, &actor, &mut doc)?;

    let id = dal.insert(R::COLLECTION, doc).await?;
    tracing::info!("{} {} created by {}", R::LABEL, id, actor.id);

    dal.get_entity(R::COLLECTION, &id)
        .await
        .map(Json)
        .ok_or_else(|| BackendError::internal(format!("{} {} unreadable after insert", R::LABEL, id)))
}

/// PUT /api/v1/<r>/{id}
pub async fn update<R: Resource>(
    State(dal): State<Dal>,
    AuthUser(actor): AuthUser,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<R::Update>, JsonRejection>,
) -> Result<Json<R::Entity>, BackendError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    update.validate()?;

    let mut changes = supplied_fields(&update)?;
    if changes.is_empty() {
        return Err(BackendError::NoFieldsToUpdate);
    }

    let current = fetch::<R>(&dal, &id).await?;
    R::on_update(&update, &current, &actor, &mut changes)?;

    if !dal.update_by_id(R::COLLECTION, &id, changes).await? {
        return Err(BackendError::NotFound { resource: R::LABEL });
    }
    tracing::info!("{} {} updated by {}", R::LABEL, id, actor.id);

    fetch::<R>(&dal, &id).await.map(Json)
}

/// DELETE /api/v1/<r>/{id}
pub async fn delete<R: Resource>(
    State(dal): State<Dal>,
    AuthUser(actor): AuthUser,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, BackendError> {
    let Path(id) = id?;

    if !dal.delete_by_id(R::COLLECTION, &id).await? {
        return Err(BackendError::NotFound { resource: R::LABEL });
    }
    tracing::info!("{} {} deleted by {}", R::LABEL, id, actor.id);

    Ok(Json(json!({ "message": format!("{} deleted successfully", R::LABEL) })))
}
