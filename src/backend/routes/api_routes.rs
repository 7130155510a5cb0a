/**
 * API Routes
 *
 * Everything under `/api/v1`.
 *
 * # Public
 * - `POST /api/v1/auth/register`
 * - `POST /api/v1/auth/login`
 *
 * # Protected (bearer token)
 * - `GET  /api/v1/auth/me`
 * - `GET  /api/v1/users`
 * - `PUT  /api/v1/users/me`
 * - CRUD under `/api/v1/{customers,leads,deals,employees,departments,attendance,leave-requests}`
 */

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::handlers::{get_me, list_users, login, register, update_me};
use crate::backend::middleware::auth_middleware;
use crate::backend::resources::{
    attendance::Attendance, customers::Customers, deals::Deals, departments::Departments,
    employees::Employees, leads::Leads, leave_requests::LeaveRequests, resource_routes,
};
use crate::backend::server::state::AppState;

pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let protected = Router::new()
        .route("/auth/me", get(get_me))
        .route("/users", get(list_users))
        .route("/users/me", put(update_me))
        .nest("/customers", resource_routes::<Customers, AppState>())
        .nest("/leads", resource_routes::<Leads, AppState>())
        .nest("/deals", resource_routes::<Deals, AppState>())
        .nest("/employees", resource_routes::<Employees, AppState>())
        .nest("/departments", resource_routes::<Departments, AppState>())
        .nest("/attendance", resource_routes::<Attendance, AppState>())
        .nest("/leave-requests", resource_routes::<LeaveRequests, AppState>())
        .route_layer(middleware::from_fn_with_state(
            app_state.auth.clone(),
            auth_middleware,
        ));

    router.nest("/api/v1", public.merge(protected))
}
