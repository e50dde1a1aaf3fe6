use axum::{extract::State, Json};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    middleware::{AppJson, AuthUser},
    state::AppState,
};
use super::{
    advisor::random_tip,
    health_models::{
        EmergencyRequest, EmergencyResponse, HealthAdvice, HealthAdviceRequest, HealthTipResponse,
    },
};

/// Symptom checker
#[utoipa::path(
    post,
    path = "/api/health-advice",
    request_body = HealthAdviceRequest,
    responses(
        (status = 200, description = "Advice for the described symptoms", body = HealthAdvice),
        (status = 400, description = "Symptoms are required"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Advice service unavailable")
    ),
    tag = "health",
    security(("bearer_auth" = []))
)]
pub async fn get_health_advice(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    AppJson(payload): AppJson<HealthAdviceRequest>,
) -> Result<Json<HealthAdvice>> {
    let symptoms = payload
        .symptoms
        .as_deref()
        .map(str::trim)
        .filter(|symptoms| !symptoms.is_empty())
        .ok_or_else(|| AppError::BadRequest("Symptoms are required".to_string()))?;

    let advice = state.health_advisor.advise(symptoms).await?;

    Ok(Json(advice))
}

/// Random daily health tip
#[utoipa::path(
    get,
    path = "/api/health-tip",
    responses(
        (status = 200, description = "A health tip", body = HealthTipResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "health",
    security(("bearer_auth" = []))
)]
pub async fn get_health_tip(AuthUser(_user_id): AuthUser) -> Json<HealthTipResponse> {
    Json(HealthTipResponse {
        tip: random_tip().to_string(),
    })
}

/// Request emergency services (simulated)
#[utoipa::path(
    post,
    path = "/api/emergency",
    request_body = EmergencyRequest,
    responses(
        (status = 200, description = "Emergency request acknowledged", body = EmergencyResponse),
        (status = 400, description = "Location and details are required"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "health",
    security(("bearer_auth" = []))
)]
pub async fn request_emergency(
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<EmergencyRequest>,
) -> Result<Json<EmergencyResponse>> {
    let provided = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.trim().is_empty());
    if !provided(&payload.location) || !provided(&payload.details) {
        return Err(AppError::BadRequest(
            "Location and emergency details are required".to_string(),
        ));
    }

    let emergency_id = Uuid::new_v4().to_string();
    tracing::warn!("Emergency {} requested by user {}", emergency_id, user_id);

    // No dispatch integration: the acknowledgement is simulated.
    Ok(Json(EmergencyResponse {
        message: "Emergency services have been notified".to_string(),
        estimated_arrival: "10-15 minutes".to_string(),
        emergency_id,
        instructions: "Stay calm. Emergency services are on their way. If possible, send someone \
to guide the ambulance to your exact location."
            .to_string(),
    }))
}
