//! Outcome notifications handed to the UI's toast layer.
//!
//! The store emits text keys and the affected product name; rendering and
//! localization happen elsewhere.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use stockroom_core::text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Text key of the title.
    pub title: &'static str,
    /// Text key of the description.
    pub description: &'static str,
    /// Name of the product concerned, when there is one.
    pub subject: Option<String>,
    pub severity: Severity,
}

impl Notification {
    pub fn added(name: &str) -> Self {
        Self::success(text::PRODUCT_ADDED, text::PRODUCT_ADDED_DESC, name)
    }

    pub fn updated(name: &str) -> Self {
        Self::success(text::PRODUCT_UPDATED, text::PRODUCT_UPDATED_DESC, name)
    }

    pub fn deleted(name: &str) -> Self {
        Self::success(text::PRODUCT_DELETED, text::PRODUCT_DELETED_DESC, name)
    }

    pub fn failed_to_save(subject: Option<String>) -> Self {
        Self::error(text::FAILED_TO_SAVE, subject)
    }

    pub fn failed_to_delete(subject: Option<String>) -> Self {
        Self::error(text::FAILED_TO_DELETE, subject)
    }

    pub fn failed_to_load() -> Self {
        Self::error(text::FAILED_TO_LOAD, None)
    }

    fn success(title: &'static str, description: &'static str, name: &str) -> Self {
        Self {
            title,
            description,
            subject: Some(name.to_string()),
            severity: Severity::Success,
        }
    }

    fn error(description: &'static str, subject: Option<String>) -> Self {
        Self {
            title: text::ERROR,
            description,
            subject,
            severity: Severity::Error,
        }
    }
}

/// Receives one notification per finished store operation.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Logs notifications through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        let subject = notification.subject.as_deref().unwrap_or("");
        match notification.severity {
            Severity::Success => tracing::info!(
                title = notification.title,
                description = notification.description,
                subject,
                "notification"
            ),
            Severity::Error => tracing::warn!(
                title = notification.title,
                description = notification.description,
                subject,
                "notification"
            ),
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notification: Notification) {}
}

/// Keeps every notification in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    received: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    pub fn received(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_notifications_carry_the_product_name() {
        let n = Notification::added("Organic Quinoa");
        assert_eq!(n.title, "products.productAdded");
        assert_eq!(n.description, "products.productAddedDesc");
        assert_eq!(n.subject.as_deref(), Some("Organic Quinoa"));
        assert_eq!(n.severity, Severity::Success);
    }

    #[test]
    fn failures_use_the_shared_error_title() {
        let n = Notification::failed_to_delete(Some("Salt".to_string()));
        assert_eq!(n.title, "products.error");
        assert_eq!(n.description, "products.failedToDelete");
        assert_eq!(n.severity, Severity::Error);
    }

    #[test]
    fn memory_sink_preserves_order() {
        let sink = MemorySink::new();
        sink.notify(Notification::added("A"));
        sink.notify(Notification::deleted("B"));
        let titles: Vec<_> = sink.received().iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["products.productAdded", "products.productDeleted"]);
    }

    #[test]
    fn memory_sink_keeps_recording_after_a_panicking_holder() {
        let sink = std::sync::Arc::new(MemorySink::new());
        sink.notify(Notification::added("A"));

        let poisoner = std::sync::Arc::clone(&sink);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.received.lock().unwrap();
            panic!("poison the sink");
        })
        .join();
        assert!(sink.received.is_poisoned());

        sink.notify(Notification::deleted("B"));
        let titles: Vec<_> = sink.received().iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["products.productAdded", "products.productDeleted"]);
    }
}
