use crate::auth::CurrentUser;
use crate::dtos::auth::{LoginRequest, MeResponse, SessionResponse};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{Extension, Json, extract::State, http::StatusCode};
use database::services::{activity::ActivityService, session::SessionService};
use serde_json::json;

const DEFAULT_SESSION_TTL_MINUTES: i64 = 720;

fn session_ttl_minutes() -> i64 {
    std::env::var("SESSION_TTL_MINUTES")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_SESSION_TTL_MINUTES)
}

/// Verifies credentials and mints a bearer session token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session created", body = SessionResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Unknown email or wrong password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return Err(ApiError::InvalidInput(
            "email and password are required".to_owned(),
        ));
    }

    let (user, session) =
        SessionService::login(&state.db, email, &body.password, session_ttl_minutes())
            .await?
            .ok_or(ApiError::Unauthorized)?;

    ActivityService::record(
        &state.db,
        Some(user.id),
        "session.login",
        json!({ "email": user.email }),
    )
    .await;

    Ok(Json(SessionResponse {
        token: session.id,
        name: user.name,
        role: user.role,
        expires_at: session.expires_at,
    }))
}

/// Revokes the caller's session token
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Session revoked"),
        (status = 401, description = "Unauthorized - invalid or missing session token"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("session" = [])
    ),
    tag = "Authentication"
)]
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<StatusCode, ApiError> {
    SessionService::logout(&state.db, user.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the authenticated caller's identity and role
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Caller identity", body = MeResponse),
        (status = 401, description = "Unauthorized - invalid or missing session token")
    ),
    security(
        ("session" = [])
    ),
    tag = "Authentication"
)]
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id,
        name: user.name.clone(),
        role: user.role.to_string(),
    })
}
