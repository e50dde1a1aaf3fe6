use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub doctor_id: i64,
    pub date: DateTime<Utc>,
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
    pub status: Option<String>,
}
