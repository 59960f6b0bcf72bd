use crate::auth::CurrentUser;
use crate::dtos::schedule::{ConflictCheckRequest, ConflictCheckResponse, parse_candidates};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{Extension, Json, extract::State};
use database::services::schedule::ScheduleService;
use models::role::Role;

/// Checks a draft schedule for room and teacher collisions (admin context)
#[utoipa::path(
    post,
    path = "/admin/schedule-conflicts",
    request_body = ConflictCheckRequest,
    responses(
        (status = 200, description = "Conflict report; finding conflicts is a successful outcome", body = ConflictCheckResponse),
        (status = 400, description = "Empty candidate list or an entry missing day/time"),
        (status = 401, description = "Unauthorized - invalid or missing session token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("session" = [])
    ),
    tag = "Scheduling"
)]
pub async fn admin_check_conflicts(
    State(state): State<AppState>,
    Json(body): Json<ConflictCheckRequest>,
) -> Result<Json<ConflictCheckResponse>, ApiError> {
    let candidates = parse_candidates(body.schedules).map_err(ApiError::InvalidInput)?;
    let report =
        ScheduleService::check_conflicts(&state.db, &candidates, body.class_id, body.teacher_id)
            .await?;
    Ok(Json(report.into()))
}

/// Checks a draft schedule for collisions against the caller's own calendar
#[utoipa::path(
    post,
    path = "/teacher/schedule-conflicts",
    request_body = ConflictCheckRequest,
    responses(
        (status = 200, description = "Conflict report; finding conflicts is a successful outcome", body = ConflictCheckResponse),
        (status = 400, description = "Empty candidate list or an entry missing day/time"),
        (status = 401, description = "Unauthorized - invalid or missing session token"),
        (status = 403, description = "Caller is neither admin nor teacher"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("session" = [])
    ),
    tag = "Scheduling"
)]
pub async fn teacher_check_conflicts(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<ConflictCheckRequest>,
) -> Result<Json<ConflictCheckResponse>, ApiError> {
    let candidates = parse_candidates(body.schedules).map_err(ApiError::InvalidInput)?;

    // A teacher checking a draft defaults to their own calendar; admins
    // must name the teacher explicitly.
    let teacher_id = body
        .teacher_id
        .or_else(|| (user.role == Role::Teacher).then_some(user.id));

    let report =
        ScheduleService::check_conflicts(&state.db, &candidates, body.class_id, teacher_id).await?;
    Ok(Json(report.into()))
}
