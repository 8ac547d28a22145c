//! Notification history storage.
//!
//! Services only see the [`NotificationStore`] trait. The in-memory store
//! below keeps records for the process lifetime; a persistent backend would
//! implement the same trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pushboard_common::AppResult;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::services::form::Platform;

/// A notification shown in the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationHistoryRecord {
    pub id: String,
    pub title: String,
    pub message: String,
    pub platform: Platform,
    pub sent_at: DateTime<Utc>,
}

/// Storage for sent notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Append a record after all existing ones.
    async fn append(&self, record: NotificationHistoryRecord) -> AppResult<()>;

    /// All records, oldest first.
    async fn list(&self) -> AppResult<Vec<NotificationHistoryRecord>>;
}

/// Shared handle to a notification store.
pub type SharedNotificationStore = Arc<dyn NotificationStore>;

/// Process-local notification store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationStore {
    records: Arc<RwLock<Vec<NotificationHistoryRecord>>>,
}

impl InMemoryNotificationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the sample history.
    #[must_use]
    pub fn with_sample_history() -> Self {
        Self {
            records: Arc::new(RwLock::new(sample_history())),
        }
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn append(&self, record: NotificationHistoryRecord) -> AppResult<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<NotificationHistoryRecord>> {
        Ok(self.records.read().await.clone())
    }
}

fn sample_record(
    id: &str,
    title: &str,
    message: &str,
    platform: Platform,
    sent_at: DateTime<Utc>,
) -> NotificationHistoryRecord {
    NotificationHistoryRecord {
        id: id.to_string(),
        title: title.to_string(),
        message: message.to_string(),
        platform,
        sent_at,
    }
}

/// The three records every fresh history starts with.
#[must_use]
pub fn sample_history() -> Vec<NotificationHistoryRecord> {
    let at = |d, h, m| {
        Utc.with_ymd_and_hms(2023, 5, d, h, m, 0)
            .single()
            .unwrap_or_default()
    };

    vec![
        sample_record("1", "Welcome", "Welcome to our app!", Platform::Both, at(20, 10, 0)),
        sample_record(
            "2",
            "New Feature",
            "Check out our new feature!",
            Platform::Ios,
            at(21, 14, 30),
        ),
        sample_record(
            "3",
            "Update Available",
            "A new update is available",
            Platform::Android,
            at(22, 9, 15),
        ),
    ]
}
