//! Identity extraction for authenticated endpoints.
//!
//! The platform's API gateway authenticates users and forwards the numeric
//! user ID in the `x-user-id` header. This crate trusts that header and
//! performs no token validation of its own; requests that reach a booking
//! endpoint without the header are rejected with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::error::AppError;
use crate::api::UserId;

/// Header carrying the authenticated user's ID, set by the gateway.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated user on booking endpoints.
#[derive(Debug, Clone, Copy)]
pub struct UserContext {
    pub user: UserId,
}

impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", USER_ID_HEADER)))?;

        let user: i64 = header
            .to_str()
            .ok()
            .and_then(|value| value.trim().parse().ok())
            .ok_or_else(|| {
                AppError::Unauthorized(format!("Invalid {} header", USER_ID_HEADER))
            })?;

        Ok(UserContext {
            user: UserId::new(user),
        })
    }
}
