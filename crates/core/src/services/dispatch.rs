//! Push notification dispatch.
//!
//! Provides an abstraction over the push gateway so the notification service
//! does not depend on a concrete transport.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pushboard_common::AppResult;
use tracing::debug;

use crate::services::form::NotificationRequest;

/// Trait for handing a validated request to a push gateway.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Dispatch a notification. Returns once the gateway accepted it.
    async fn dispatch(&self, request: &NotificationRequest) -> AppResult<()>;
}

/// Shared dispatcher handle.
pub type SharedDispatcher = Arc<dyn NotificationDispatcher>;

/// Dispatcher that only waits, standing in for a real gateway.
#[derive(Debug, Clone)]
pub struct SimulatedDispatcher {
    delay: Duration,
}

impl SimulatedDispatcher {
    /// Create a dispatcher that accepts every request after `delay`.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl NotificationDispatcher for SimulatedDispatcher {
    async fn dispatch(&self, request: &NotificationRequest) -> AppResult<()> {
        debug!(
            platform = %request.platform,
            delay = ?self.delay,
            "Simulating push gateway call"
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
