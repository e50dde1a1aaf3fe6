use crate::db::DbPool;
use crate::error::{AppError, Result};
use super::user_models::User;

#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Fails with `BadRequest` when the username is taken.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        full_name: &str,
        email: &str,
    ) -> Result<User> {
        let mut users = self.pool.users.write().await;

        if users.values().any(|user| user.username == username) {
            return Err(AppError::BadRequest("Username already exists".to_string()));
        }

        let user = User {
            id: self.pool.next_user_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let users = self.pool.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.pool.users.read().await;
        Ok(users.values().find(|user| user.username == username).cloned())
    }
}
