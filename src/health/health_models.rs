use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthAdvice {
    pub advice: String,
    pub severity: Severity,
    pub seek_medical_attention: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HealthAdviceRequest {
    pub symptoms: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthTipResponse {
    pub tip: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmergencyRequest {
    pub location: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyResponse {
    pub message: String,
    pub estimated_arrival: String,
    pub emergency_id: String,
    pub instructions: String,
}
