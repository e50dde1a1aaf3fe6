use crate::auth::{create_access_token, hash_password, verify_password};
use crate::error::{AppError, Result};
use crate::user::user_models::User;
use crate::user::user_repository::UserRepository;

use super::auth_dto::RegisterRequest;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    jwt_expiration_hours: i64,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, jwt_expiration_hours: i64) -> Self {
        Self {
            user_repo,
            jwt_secret,
            jwt_expiration_hours,
        }
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<(User, String)> {
        let password_hash = hash_password(&payload.password)?;

        let user = self
            .user_repo
            .create(
                &payload.username,
                &password_hash,
                &payload.full_name,
                &payload.email,
            )
            .await?;

        let token = self.issue_token(&user)?;
        tracing::info!("Registered user {} ({})", user.id, user.username);

        Ok((user, token))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String)> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".into()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Authentication("Invalid credentials".into()));
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    pub fn issue_token(&self, user: &User) -> Result<String> {
        create_access_token(
            user.id,
            &user.username,
            &self.jwt_secret,
            self.jwt_expiration_hours,
        )
    }
}
