use std::sync::Arc;

use crate::api::Payload;
use crate::auth::{generate_jwt, hash_password, verify_password};
use crate::config::SecurityConfig;
use crate::database::models::{NewUser, SignInInput, SignUpInput};
use crate::database::repository::UserRepository;
use crate::error::ApiError;
use crate::services::validation::{validate_email, validate_nickname, validate_password};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    security: SecurityConfig,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, security: SecurityConfig) -> Self {
        Self { users, security }
    }

    /// Register a user; duplicate nickname or email → 409
    pub async fn sign_up(&self, input: SignUpInput) -> Result<Payload, ApiError> {
        validate_nickname(&input.nickname)?;
        validate_email(&input.email)?;
        validate_password(&input.password)?;

        // Argon2 is deliberately slow; keep it off the async workers
        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ApiError::internal_server_error(format!("Hashing task failed: {}", e)))??;

        let user = NewUser {
            nickname: input.nickname,
            email: input.email,
            password_hash,
        };
        let uid = self.users.create(&user).await?;

        tracing::info!("Registered user {} ({})", uid, user.nickname);
        Ok(Payload::UserId { uid })
    }

    /// Exchange credentials for a bearer token
    pub async fn sign_in(&self, input: SignInInput) -> Result<Payload, ApiError> {
        let user = match self.users.get_by_nickname(&input.nickname).await {
            Ok(user) => user,
            Err(err) if err.is_not_found() => {
                tracing::warn!("Sign-in for unknown nickname '{}'", input.nickname);
                return Err(invalid_credentials());
            }
            Err(err) => return Err(err.into()),
        };

        let (password, stored) = (input.password, user.password.clone());
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|e| ApiError::internal_server_error(format!("Hashing task failed: {}", e)))?;
        if !verified {
            tracing::warn!("Sign-in with wrong password for user {}", user.id);
            return Err(invalid_credentials());
        }

        let token = generate_jwt(&self.security, user.id, &user.nickname)?;
        Ok(Payload::Token { token })
    }

    pub async fn get(&self, user_id: i64) -> Result<Payload, ApiError> {
        let user = self.users.get_by_id(user_id).await?;
        Ok(Payload::User { user })
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid nickname or password")
}
