//! API handlers for Biblio REST endpoints

pub mod auth;
pub mod books;
pub mod fines;
pub mod health;
pub mod loans;
pub mod notifications;
pub mod openapi;
pub mod reservations;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{
    error::AppError,
    models::user::{TokenType, UserClaims},
    AppState,
};

/// Extractor for the authenticated principal from a bearer JWT.
///
/// Handlers receive the claims as an explicit value and pass them down to
/// the services; there is no ambient current-user state.
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        // Validate JWT token using the secret from configuration
        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        // Refresh tokens are only good for the refresh endpoint
        if claims.token_type != TokenType::Access {
            return Err(AppError::Authentication(
                "Refresh token cannot be used for authentication".to_string(),
            ));
        }

        Ok(AuthenticatedUser(claims))
    }
}
