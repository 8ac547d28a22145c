//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::post};
use pushboard_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthSession, MaybeAuthSession},
    middleware::AppState,
    response::ApiResponse,
};

/// Signin request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

/// Signin response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub token: String,
    pub created_at: String,
}

/// Sign in with the shared credentials.
async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> AppResult<ApiResponse<SigninResponse>> {
    let session = state
        .session_service
        .login(&req.username, &req.password)
        .await?;

    Ok(ApiResponse::ok(SigninResponse {
        token: session.token,
        created_at: session.created_at.to_rfc3339(),
    }))
}

/// Signout response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignoutResponse {
    pub ok: bool,
}

/// Sign out, closing the current session.
async fn signout(
    AuthSession(session): AuthSession,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<SignoutResponse>> {
    state.session_service.logout(&session).await;

    Ok(ApiResponse::ok(SignoutResponse { ok: true }))
}

/// Session check response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub valid: bool,
}

/// Report whether the presented bearer token is an open session.
async fn session(MaybeAuthSession(session): MaybeAuthSession) -> ApiResponse<SessionResponse> {
    ApiResponse::ok(SessionResponse {
        valid: session.is_some(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", post(signin))
        .route("/signout", post(signout))
        .route("/session", post(session))
}
