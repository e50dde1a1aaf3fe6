use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, Result},
    state::AppState,
};
use super::doctor_models::Doctor;

/// List all doctors
#[utoipa::path(
    get,
    path = "/api/doctors",
    responses(
        (status = 200, description = "Doctor directory", body = Vec<Doctor>)
    ),
    tag = "doctors"
)]
pub async fn get_doctors(State(state): State<AppState>) -> Result<Json<Vec<Doctor>>> {
    let doctors = state.doctor_repository.find_all().await?;
    Ok(Json(doctors))
}

/// Get a doctor by id
#[utoipa::path(
    get,
    path = "/api/doctors/{id}",
    params(
        ("id" = i64, Path, description = "Doctor id")
    ),
    responses(
        (status = 200, description = "Doctor found", body = Doctor),
        (status = 404, description = "Doctor not found")
    ),
    tag = "doctors"
)]
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Doctor>> {
    let doctor = state
        .doctor_repository
        .find_by_id(doctor_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(doctor))
}
