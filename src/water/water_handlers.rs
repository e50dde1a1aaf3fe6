use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    health::advisor::water_intake_advice,
    middleware::{AppJson, AuthUser},
    state::AppState,
};
use super::water_models::{WaterIntake, WaterIntakeRequest, WaterIntakeSummary, DAILY_TARGET_ML};

/// Record a glass of water
#[utoipa::path(
    post,
    path = "/api/water-intake",
    request_body = WaterIntakeRequest,
    responses(
        (status = 201, description = "Intake recorded", body = WaterIntake),
        (status = 400, description = "Missing, non-numeric or out-of-range amount"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "water",
    security(("bearer_auth" = []))
)]
pub async fn add_water_intake(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<WaterIntakeRequest>,
) -> Result<impl IntoResponse> {
    let invalid = || AppError::BadRequest("Valid amount in milliliters is required".to_string());
    payload.validate().map_err(|_| invalid())?;
    let amount = payload.amount.ok_or_else(invalid)?;

    let record = state.water_repository.add(user_id, amount).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Water intake history of the current user
#[utoipa::path(
    get,
    path = "/api/water-intake",
    responses(
        (status = 200, description = "Intake history, newest first", body = Vec<WaterIntake>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "water",
    security(("bearer_auth" = []))
)]
pub async fn get_water_intake_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<WaterIntake>>> {
    let history = state.water_repository.history(user_id).await?;
    Ok(Json(history))
}

/// Today's progress against the daily target
#[utoipa::path(
    get,
    path = "/api/water-intake/summary",
    responses(
        (status = 200, description = "Today's total and advice", body = WaterIntakeSummary),
        (status = 401, description = "Unauthorized")
    ),
    tag = "water",
    security(("bearer_auth" = []))
)]
pub async fn get_water_intake_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<WaterIntakeSummary>> {
    let today_total = state
        .water_repository
        .total_for_day(user_id, Utc::now().date_naive())
        .await?;

    Ok(Json(WaterIntakeSummary {
        today_total,
        target: DAILY_TARGET_ML,
        progress_percent: today_total as f64 / f64::from(DAILY_TARGET_ML) * 100.0,
        advice: water_intake_advice(today_total, DAILY_TARGET_ML).to_string(),
    }))
}
