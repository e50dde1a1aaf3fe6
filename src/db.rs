use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    appointment::appointment_models::Appointment, doctor::doctor_models::Doctor,
    user::user_models::User, water::water_models::WaterIntake,
};

pub type DbPool = Arc<MemoryStore>;

/// Process-local tables. Nothing here survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    pub(crate) users: RwLock<HashMap<i64, User>>,
    pub(crate) doctors: RwLock<HashMap<i64, Doctor>>,
    pub(crate) appointments: RwLock<HashMap<i64, Appointment>>,
    pub(crate) water_intake: RwLock<Vec<WaterIntake>>,
    user_seq: AtomicI64,
    appointment_seq: AtomicI64,
    water_seq: AtomicI64,
}

impl MemoryStore {
    pub(crate) fn next_user_id(&self) -> i64 {
        self.user_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn next_appointment_id(&self) -> i64 {
        self.appointment_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn next_water_id(&self) -> i64 {
        self.water_seq.fetch_add(1, Ordering::SeqCst) + 1
    }
}

pub fn create_pool() -> DbPool {
    Arc::new(MemoryStore::default())
}

pub async fn seed_doctors(pool: &DbPool) {
    let seed = [
        Doctor {
            id: 1,
            name: "Dr. Sarah Johnson".to_string(),
            specialty: "General Medicine".to_string(),
            image_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=dr1".to_string(),
            available_days: vec![
                "Monday".to_string(),
                "Tuesday".to_string(),
                "Wednesday".to_string(),
            ],
        },
        Doctor {
            id: 2,
            name: "Dr. Michael Chen".to_string(),
            specialty: "Cardiology".to_string(),
            image_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=dr2".to_string(),
            available_days: vec![
                "Wednesday".to_string(),
                "Thursday".to_string(),
                "Friday".to_string(),
            ],
        },
    ];

    let mut doctors = pool.doctors.write().await;
    for doctor in seed {
        doctors.insert(doctor.id, doctor);
    }
    tracing::debug!("Seeded {} doctors", doctors.len());
}
