use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const DAILY_TARGET_ML: u32 = 2500;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WaterIntake {
    pub id: i64,
    pub user_id: i64,
    /// Millilitres
    pub amount: u32,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WaterIntakeRequest {
    /// Millilitres, at most 5 litres per entry
    #[validate(range(min = 1, max = 5000))]
    pub amount: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WaterIntakeSummary {
    pub today_total: u64,
    pub target: u32,
    pub progress_percent: f64,
    pub advice: String,
}
