//! Notification service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use pushboard_common::{AppResult, IdGenerator, config::NotificationsConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::services::dispatch::{SharedDispatcher, SimulatedDispatcher};
use crate::services::form::{self, NotificationForm, NotificationRequest};
use crate::services::store::{NotificationHistoryRecord, SharedNotificationStore};

/// Record returned after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    #[serde(flatten)]
    pub request: NotificationRequest,
    pub sent_at: DateTime<Utc>,
}

/// Notification service for sending and listing notifications.
#[derive(Clone)]
pub struct NotificationService {
    dispatcher: SharedDispatcher,
    store: SharedNotificationStore,
    id_gen: IdGenerator,
    clear_hidden_fields: bool,
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(dispatcher: SharedDispatcher, store: SharedNotificationStore) -> Self {
        Self {
            dispatcher,
            store,
            id_gen: IdGenerator::new(),
            clear_hidden_fields: false,
        }
    }

    /// Create a service with a simulated dispatcher configured from `config`.
    #[must_use]
    pub fn from_config(config: &NotificationsConfig, store: SharedNotificationStore) -> Self {
        let dispatcher = SimulatedDispatcher::new(Duration::from_millis(config.submit_delay_ms));
        let mut service = Self::new(Arc::new(dispatcher), store);
        service.set_clear_hidden_fields(config.clear_hidden_fields);
        service
    }

    /// Drop values of hidden platform groups before dispatching.
    pub fn set_clear_hidden_fields(&mut self, clear: bool) {
        self.clear_hidden_fields = clear;
    }

    /// Validate a raw form and submit it.
    pub async fn send(&self, input: &NotificationForm) -> AppResult<Acknowledgment> {
        let request = form::validate(input)?;
        self.submit(request).await
    }

    /// Submit a validated request.
    ///
    /// Overlapping submissions are neither serialized nor deduplicated.
    pub async fn submit(&self, request: NotificationRequest) -> AppResult<Acknowledgment> {
        let request = if self.clear_hidden_fields {
            request.without_hidden_fields()
        } else {
            request
        };

        self.dispatcher.dispatch(&request).await?;
        let sent_at = Utc::now();

        self.store
            .append(NotificationHistoryRecord {
                id: self.id_gen.generate(),
                title: request.title.clone(),
                message: request.message.clone(),
                platform: request.platform,
                sent_at,
            })
            .await?;

        let ack = Acknowledgment { request, sent_at };
        info!(
            title = %ack.request.title,
            platform = %ack.request.platform,
            sent_at = %ack.sent_at.to_rfc3339(),
            "Notification sent"
        );
        debug!(ack = ?ack, "Notification acknowledgment");

        Ok(ack)
    }

    /// Sent notifications, oldest first.
    pub async fn history(&self) -> AppResult<Vec<NotificationHistoryRecord>> {
        self.store.list().await
    }
}
