use crate::db::DbPool;
use crate::error::Result;
use super::doctor_models::Doctor;

#[derive(Clone)]
pub struct DoctorRepository {
    pool: DbPool,
}

impl DoctorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All doctors ordered by id.
    pub async fn find_all(&self) -> Result<Vec<Doctor>> {
        let doctors = self.pool.doctors.read().await;
        let mut all: Vec<Doctor> = doctors.values().cloned().collect();
        all.sort_by_key(|doctor| doctor.id);
        Ok(all)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Doctor>> {
        let doctors = self.pool.doctors.read().await;
        Ok(doctors.get(&id).cloned())
    }
}
