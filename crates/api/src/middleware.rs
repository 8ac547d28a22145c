//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use pushboard_core::{NotificationService, SessionService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Login gate.
    pub session_service: SessionService,
    /// Notification submission and history.
    pub notification_service: NotificationService,
}

/// Authentication middleware.
///
/// Attaches the [`pushboard_core::Session`] to the request when the bearer
/// token belongs to an open session. Other requests pass through unchanged
/// and protected handlers reject them via the extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        match state.session_service.resolve(token.trim()).await {
            Some(session) => {
                req.extensions_mut().insert(session);
            }
            None => tracing::debug!("Ignoring unknown session token"),
        }
    }

    next.run(req).await
}
