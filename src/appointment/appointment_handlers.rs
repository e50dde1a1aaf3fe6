use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::Result,
    middleware::{AppJson, AuthUser},
    state::AppState,
};
use super::{appointment_dto::CreateAppointmentRequest, appointment_models::Appointment};

/// Get the authenticated user's appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    responses(
        (status = 200, description = "Appointments of the current user", body = Vec<Appointment>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn get_appointments(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Appointment>>> {
    let appointments = state
        .appointment_service
        .get_user_appointments(user_id)
        .await?;

    Ok(Json(appointments))
}

/// Book an appointment; pushes `appointment_created` to the user's socket
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<CreateAppointmentRequest>,
) -> Result<impl IntoResponse> {
    let appointment = state
        .appointment_service
        .create_appointment(user_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}
