pub mod auth;
pub mod conflicts;
pub mod health;
pub mod schedules;

use crate::auth::{RolePolicy, authenticate, enforce};
use crate::doc::ApiDoc;
use crate::state::AppState;
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the full application router.
///
/// Session resolution and role policies are applied here, at the routing
/// layer; handlers receive an already-authorized [`crate::auth::CurrentUser`].
pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/admin/schedule-conflicts",
            post(conflicts::admin_check_conflicts),
        )
        .route_layer(middleware::from_fn(|request: Request, next: Next| {
            enforce(RolePolicy::ADMIN_ONLY, request, next)
        }));

    let staff_routes = Router::new()
        .route(
            "/teacher/schedule-conflicts",
            post(conflicts::teacher_check_conflicts),
        )
        .route(
            "/classes/{id}/schedules",
            get(schedules::list_class_schedules).put(schedules::replace_class_schedules),
        )
        .route_layer(middleware::from_fn(|request: Request, next: Next| {
            enforce(RolePolicy::STAFF, request, next)
        }));

    let session_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/logout", post(auth::logout))
        .route_layer(middleware::from_fn(|request: Request, next: Next| {
            enforce(RolePolicy::ANY_ROLE, request, next)
        }));

    Router::new()
        .merge(admin_routes)
        .merge(staff_routes)
        .merge(session_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ))
        // Everything below is reachable without a session.
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .with_state(state)
}
