use crate::auth::CurrentUser;
use crate::dtos::schedule::{
    ReplaceScheduleRequest, ScheduleAction, ScheduleSlotDto, parse_candidates,
};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::{
    activity::ActivityService, class::ClassService, schedule::ScheduleService,
};
use sea_orm::prelude::Uuid;
use serde_json::json;

/// Lists a class's weekly schedule slots
#[utoipa::path(
    get,
    path = "/classes/{id}/schedules",
    params(
        ("id" = Uuid, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Schedule slots ordered by weekday and time", body = [ScheduleSlotDto]),
        (status = 401, description = "Unauthorized - invalid or missing session token"),
        (status = 403, description = "Caller is neither admin nor teacher"),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("session" = [])
    ),
    tag = "Scheduling"
)]
pub async fn list_class_schedules(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ScheduleSlotDto>>, ApiError> {
    let class = ClassService::get_class(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("class not found".to_owned()))?;

    let slots = ScheduleService::schedules_for_class(&state.db, class.id).await?;
    Ok(Json(slots.into_iter().map(Into::into).collect()))
}

/// Replaces (or appends to) a class's weekly schedule
#[utoipa::path(
    put,
    path = "/classes/{id}/schedules",
    params(
        ("id" = Uuid, Path, description = "Class ID")
    ),
    request_body = ReplaceScheduleRequest,
    responses(
        (status = 204, description = "Schedule applied"),
        (status = 400, description = "An entry is missing day/time or is malformed"),
        (status = 401, description = "Unauthorized - invalid or missing session token"),
        (status = 403, description = "Caller is neither admin nor teacher"),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("session" = [])
    ),
    tag = "Scheduling"
)]
pub async fn replace_class_schedules(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<ReplaceScheduleRequest>,
) -> Result<StatusCode, ApiError> {
    let class = ClassService::get_class(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("class not found".to_owned()))?;

    let slots = parse_candidates(body.schedules).map_err(ApiError::InvalidInput)?;

    match body.action {
        ScheduleAction::Replace => {
            ScheduleService::replace_class_schedule(&state.db, class.id, &slots).await?
        }
        ScheduleAction::Append => {
            ScheduleService::append_class_schedule(&state.db, class.id, &slots).await?
        }
    }

    let action = match body.action {
        ScheduleAction::Replace => "schedule.replace",
        ScheduleAction::Append => "schedule.append",
    };
    ActivityService::record(
        &state.db,
        Some(user.id),
        action,
        json!({ "classId": class.id, "slots": slots.len() }),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
