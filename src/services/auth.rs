//! Authentication service: account registration, credential checks and
//! JWT issuance. The core trusts the resulting claims; authorization is a
//! role predicate applied per endpoint.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{RegisterUser, Role, TokenType, User, UserClaims},
    repository::Repository,
};

/// Access + refresh token pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new member account
    pub async fn register(&self, payload: RegisterUser) -> AppResult<User> {
        if self
            .repository
            .users
            .get_by_email(&payload.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }

        let password_hash = self.hash_password(&payload.password)?;
        let user = self
            .repository
            .users
            .create(&payload.email, &payload.full_name, &password_hash, Role::Member)
            .await?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Authenticate by email and password, returning a token pair
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(TokenPair, User)> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let tokens = self.token_pair(&user)?;
        Ok((tokens, user))
    }

    /// Look up the authenticated principal's account
    pub async fn current_user(&self, user_id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(user_id).await
    }

    /// Exchange a valid refresh token for a fresh token pair
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = UserClaims::from_token(refresh_token, &self.config.jwt_secret)
            .map_err(|_| AppError::Authentication("Invalid or expired refresh token".to_string()))?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::Authentication(
                "Invalid or expired refresh token".to_string(),
            ));
        }

        let user = self
            .repository
            .users
            .get_by_id(claims.user_id)
            .await
            .map_err(|_| AppError::Authentication("Unknown user".to_string()))?;
        self.token_pair(&user)
    }

    /// Build the access/refresh pair for a user
    fn token_pair(&self, user: &User) -> AppResult<TokenPair> {
        let now = Utc::now().timestamp();

        let access = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            token_type: TokenType::Access,
            exp: now + self.config.jwt_expiration_minutes as i64 * 60,
            iat: now,
        };
        let refresh = UserClaims {
            token_type: TokenType::Refresh,
            exp: now + self.config.jwt_refresh_expiration_days as i64 * 86400,
            ..access.clone()
        };

        let access_token = access
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;
        let refresh_token = refresh
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Hash a password with argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against the stored hash
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
