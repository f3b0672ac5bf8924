//! Sink forwarding each notification to several channels

use async_trait::async_trait;
use std::sync::Arc;

use pv_core::services::otp::{NotificationSink, OtpNotification};

/// Dispatches to every inner sink
///
/// All sinks are tried even when an earlier one fails; the dispatch fails if
/// any of them failed.
pub struct FanoutSink {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn NotificationSink>>) -> Self {
        Self { sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl NotificationSink for FanoutSink {
    async fn dispatch(&self, identifier: &str, notification: &OtpNotification) -> Result<(), String> {
        let mut errors = Vec::new();

        for sink in &self.sinks {
            if let Err(e) = sink.dispatch(identifier, notification).await {
                tracing::warn!(error = %e, "Notification channel failed");
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }
}
