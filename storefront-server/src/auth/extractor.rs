//! JWT Extractor
//!
//! Custom extractor that validates the bearer token and yields the verified
//! caller identity to protected handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use shared::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                tracing::warn!(uri = %parts.uri, "Request without authorization header");
                return Err(AppError::unauthorized());
            }
        };

        match state.jwt_service.validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::from(claims);
                // Store in extensions for potential reuse
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(JwtError::ExpiredToken) => Err(AppError::token_expired()),
            Err(e) => {
                tracing::warn!(uri = %parts.uri, error = %e, "Token validation failed");
                Err(AppError::invalid_token("Invalid token"))
            }
        }
    }
}
