use log::{info, warn};
use std::sync::Arc;
use validator::Validate;

use crate::auth::{password, LoginRequest, RegisterRequest, TokenService};
use crate::error::AppError;
use crate::models::User;
use crate::store::UserRepository;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Registers users and exchanges valid credentials for bearer tokens.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Creates a user with a fresh salt and keyed password hash.
    ///
    /// Returns `AppError::Conflict` when the username is already taken.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AppError> {
        request.validate()?;

        if self.users.find_by_username(&request.username).await?.is_some() {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let digest = password::hash_password(&request.password)?;
        // A concurrent registration that wins the race surfaces as a duplicate key.
        let user = self
            .users
            .add(User::new(request.username.clone(), digest.hash, digest.salt))
            .await?;

        info!("registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Checks the credentials and issues a token.
    ///
    /// Unknown usernames and wrong passwords produce the same `Unauthorized` error.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, AppError> {
        request.validate()?;

        let user = match self.users.find_by_username(&request.username).await? {
            Some(user) => user,
            None => {
                password::verify_against_dummy(&request.password);
                warn!("login failed for {}: unknown user", request.username);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
            }
        };

        if !password::verify_password(&request.password, &user.password_hash, &user.password_salt) {
            warn!("login failed for {}: password mismatch", request.username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let token = self.tokens.issue(&user)?;
        info!("user {} logged in", user.id);
        Ok(token)
    }
}
