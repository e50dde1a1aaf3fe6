use chrono::{NaiveDate, Utc};

use crate::db::DbPool;
use crate::error::Result;
use super::water_models::WaterIntake;

#[derive(Clone)]
pub struct WaterIntakeRepository {
    pool: DbPool,
}

impl WaterIntakeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn add(&self, user_id: i64, amount: u32) -> Result<WaterIntake> {
        let record = WaterIntake {
            id: self.pool.next_water_id(),
            user_id,
            amount,
            recorded_at: Utc::now(),
        };
        self.pool.water_intake.write().await.push(record.clone());
        Ok(record)
    }

    /// Newest first.
    pub async fn history(&self, user_id: i64) -> Result<Vec<WaterIntake>> {
        let records = self.pool.water_intake.read().await;
        let mut history: Vec<WaterIntake> = records
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at).then(b.id.cmp(&a.id)));
        Ok(history)
    }

    /// Total millilitres recorded on `day` (UTC).
    pub async fn total_for_day(&self, user_id: i64, day: NaiveDate) -> Result<u64> {
        let records = self.pool.water_intake.read().await;
        Ok(records
            .iter()
            .filter(|record| record.user_id == user_id && record.recorded_at.date_naive() == day)
            .map(|record| u64::from(record.amount))
            .sum())
    }
}
