//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use pushboard_common::AppError;
use pushboard_core::Session;

/// Authenticated session extractor.
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by auth middleware once the token is known to be open
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(AuthSession)
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional authenticated session extractor.
#[derive(Debug, Clone)]
pub struct MaybeAuthSession(pub Option<Session>);

impl<S> FromRequestParts<S> for MaybeAuthSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Session>().cloned()))
    }
}
