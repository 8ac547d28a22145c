//! Notification endpoints.

use std::collections::BTreeSet;

use axum::{Json, Router, extract::State, routing::post};
use pushboard_common::{AppError, AppResult};
use pushboard_core::{
    Acknowledgment, FieldGroup, NotificationForm, NotificationHistoryRecord, NotificationRequest,
    Platform, validate, visible_groups,
};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthSession, middleware::AppState, response::ApiResponse};

/// Visible field groups and the fields they contain.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsResponse {
    pub groups: BTreeSet<FieldGroup>,
    pub fields: Vec<&'static str>,
}

impl From<Platform> for GroupsResponse {
    fn from(platform: Platform) -> Self {
        let groups = visible_groups(platform);
        let fields = groups.iter().flat_map(|g| g.fields().iter().copied()).collect();
        Self { groups, fields }
    }
}

/// Fresh form response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub defaults: NotificationForm,
    #[serde(flatten)]
    pub visible: GroupsResponse,
}

/// Default values for a new notification form.
async fn form() -> ApiResponse<FormResponse> {
    ApiResponse::ok(FormResponse {
        defaults: NotificationForm::default(),
        visible: Platform::Both.into(),
    })
}

/// Visible groups request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsRequest {
    pub platform: String,
}

/// Field groups to present for the selected platform.
async fn groups(Json(req): Json<GroupsRequest>) -> AppResult<ApiResponse<GroupsResponse>> {
    let platform = req
        .platform
        .parse::<Platform>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(ApiResponse::ok(platform.into()))
}

/// Validate a form without sending it.
async fn validate_form(
    Json(req): Json<NotificationForm>,
) -> AppResult<ApiResponse<NotificationRequest>> {
    let request = validate(&req)?;
    Ok(ApiResponse::ok(request))
}

/// Validate and send a notification.
async fn send(
    AuthSession(_session): AuthSession,
    State(state): State<AppState>,
    Json(req): Json<NotificationForm>,
) -> AppResult<ApiResponse<Acknowledgment>> {
    let ack = state.notification_service.send(&req).await?;
    Ok(ApiResponse::ok(ack))
}

/// List sent notifications, oldest first.
async fn history(
    AuthSession(_session): AuthSession,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<NotificationHistoryRecord>>> {
    let records = state.notification_service.history().await?;
    Ok(ApiResponse::ok(records))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/form", post(form))
        .route("/groups", post(groups))
        .route("/validate", post(validate_form))
        .route("/send", post(send))
        .route("/history", post(history))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_response_lists_fields() {
        let response = GroupsResponse::from(Platform::Both);
        assert_eq!(
            response.fields,
            vec!["subtitle", "badgeCount", "playSound", "channelId"]
        );

        let response = GroupsResponse::from(Platform::Android);
        assert_eq!(response.groups, BTreeSet::from([FieldGroup::Android]));
        assert_eq!(response.fields, vec!["channelId"]);
    }
}
