//! CRM and HRMS Resources
//!
//! Every business resource (customers, leads, deals, employees, departments,
//! attendance, leave requests) gets the same five endpoints from one set of
//! generic handlers. A resource supplies its collection, its request and
//! entity types, and optionally hooks that derive extra fields.
//!
//! # Module Structure
//!
//! ```text
//! resources/
//! ├── mod.rs            - Resource trait and route builder
//! ├── handlers.rs       - Generic list/get/create/update/delete
//! ├── query.rs          - skip/limit/filter parsing
//! ├── customers.rs
//! ├── leads.rs
//! ├── deals.rs
//! ├── employees.rs
//! ├── departments.rs
//! ├── attendance.rs
//! └── leave_requests.rs
//! ```
//!
//! # Endpoints
//!
//! For a resource mounted at `/api/v1/<r>`:
//!
//! - `POST   /`     - create, stamps `created_by`
//! - `GET    /`     - list with `skip`, `limit` and allowed filters; `X-Total-Count`
//! - `GET    /{id}` - fetch one, 404 if missing
//! - `PUT    /{id}` - partial update, 400 when empty
//! - `DELETE /{id}` - remove

use axum::{extract::FromRef, routing::get, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::backend::auth::service::AuthService;
use crate::backend::auth::users::User;
use crate::backend::database::{Dal, Document};
use crate::backend::error::BackendError;

pub mod handlers;
pub mod query;

pub mod attendance;
pub mod customers;
pub mod deals;
pub mod departments;
pub mod employees;
pub mod leads;
pub mod leave_requests;

pub use query::ListQuery;

/// A collection exposed through the generic CRUD handlers
pub trait Resource: Send + Sync + 'static {
    /// Collection the records live in
    const COLLECTION: &'static str;

    /// Singular name used in messages ("Customer not found")
    const LABEL: &'static str;

    /// Query parameters accepted as equality filters on list
    const FILTERS: &'static [&'static str];

    type Create: DeserializeOwned + Serialize + Validate + Send + 'static;
    /// Every field optional; `None` means "leave unchanged"
    type Update: DeserializeOwned + Serialize + Validate + Send + Sync + 'static;
    type Entity: DeserializeOwned + Serialize + Send + 'static;

    /// Derive or check fields before a new record is stored
    fn on_create(
        _input: &Self::Create,
        _actor: &User,
        _doc: &mut Document,
    ) -> Result<(), BackendError> {
        Ok(())
    }

    /// Derive or check fields before an update is applied
    ///
    /// `changes` holds only the fields the client supplied.
    fn on_update(
        _update: &Self::Update,
        _current: &Self::Entity,
        _actor: &User,
        _changes: &mut Document,
    ) -> Result<(), BackendError> {
        Ok(())
    }
}

/// The five CRUD routes for `R`, to be nested under its path
pub fn resource_routes<R, S>() -> Router<S>
where
    R: Resource,
    S: Clone + Send + Sync + 'static,
    Dal: FromRef<S>,
    AuthService: FromRef<S>,
{
    Router::new()
        .route(
            "/",
            get(handlers::list::<R>).post(handlers::create::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::delete::<R>),
        )
}
