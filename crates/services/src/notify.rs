//! Fire-and-forget user notifications (toasts in a GUI, lines in a terminal).

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }
}

/// Receives notifications. Implementations must not block the caller.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the `tracing` pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => {
                tracing::warn!(target: "quizzy::notify", "{}", notification.message);
            }
            NotificationKind::Success | NotificationKind::Info => {
                tracing::info!(target: "quizzy::notify", "{}", notification.message);
            }
        }
    }
}

/// Keeps every notification in memory; the terminal shell drains it after
/// each action.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Take and clear the recorded notifications.
    pub fn drain(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.snapshot().into_iter().map(|n| n.message).collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.seen.lock() {
            guard.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order_and_drains() {
        let sink = RecordingSink::new();
        sink.notify(Notification::success("first"));
        sink.notify(Notification::error("second"));

        assert_eq!(sink.messages(), vec!["first", "second"]);
        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].kind, NotificationKind::Error);
        assert!(sink.snapshot().is_empty());
    }

    #[test]
    fn clones_share_the_buffer() {
        let sink = RecordingSink::new();
        let shared: Arc<dyn NotificationSink> = Arc::new(sink.clone());
        shared.notify(Notification::info("hello"));
        assert_eq!(sink.messages(), vec!["hello"]);
    }
}
