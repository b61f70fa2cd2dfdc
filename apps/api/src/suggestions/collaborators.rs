//! Outbound collaborators: the notification sink and the clipboard.
//!
//! Notifications are fire-and-forget; nothing in the lifecycle depends on their
//! outcome. Clipboard writes may fail, which is reported as a notification and
//! never changes stored state.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

// ────────────────────────────────────────────────────────────────────────────
// Notifications
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    RewriteApplied {
        suggestion_id: String,
        bullet_id: String,
    },
    QuickEditApplied {
        bullet_id: String,
        action_label: String,
    },
    AllQuickActionsApplied {
        suggestion_id: String,
    },
    EditSaved {
        bullet_id: String,
    },
    CopySucceeded {
        suggestion_id: String,
    },
    CopyFailed {
        suggestion_id: String,
        reason: String,
    },
}

impl Notification {
    pub fn is_failure(&self) -> bool {
        matches!(self, Notification::CopyFailed { .. })
    }

    pub fn title(&self) -> &'static str {
        match self {
            Notification::RewriteApplied { .. } => "Rewrite applied!",
            Notification::QuickEditApplied { .. } => "Quick edit applied!",
            Notification::AllQuickActionsApplied { .. } => "All quick actions applied!",
            Notification::EditSaved { .. } => "Changes saved!",
            Notification::CopySucceeded { .. } => "Copied to clipboard!",
            Notification::CopyFailed { .. } => "Failed to copy",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Notification::RewriteApplied { .. } => {
                "The bullet point has been updated in your resume.".to_string()
            }
            Notification::QuickEditApplied { action_label, .. } if !action_label.is_empty() => {
                action_label.clone()
            }
            Notification::QuickEditApplied { .. } | Notification::EditSaved { .. } => {
                "The bullet point has been updated.".to_string()
            }
            Notification::AllQuickActionsApplied { .. } => {
                "The suggestion has been moved to Done.".to_string()
            }
            Notification::CopySucceeded { .. } => "The rewrite text has been copied.".to_string(),
            Notification::CopyFailed { .. } => "Please try again.".to_string(),
        }
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Per-session queue of notifications, drained by the rendering collaborator.
#[derive(Debug, Default)]
pub struct NotificationOutbox {
    pending: Mutex<Vec<Notification>>,
}

impl NotificationOutbox {
    pub fn drain(&self) -> Vec<Notification> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *pending)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Notifier for NotificationOutbox {
    fn notify(&self, notification: Notification) {
        log_notification(&notification);
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

fn log_notification(notification: &Notification) {
    if notification.is_failure() {
        warn!("{}: {}", notification.title(), notification.description());
    } else {
        info!("{}: {}", notification.title(), notification.description());
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Clipboard
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard write rejected: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Process-wide sink holding the last copied text. Nothing reads it back: the copy
/// endpoint returns the text and the HTTP client mirrors it into the user's real
/// clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: tokio::sync::Mutex<Option<String>>,
}

impl MemoryClipboard {
    #[cfg(test)]
    pub async fn contents(&self) -> Option<String> {
        self.contents.lock().await.clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if text.trim().is_empty() {
            return Err(ClipboardError::Rejected("nothing to copy".to_string()));
        }
        *self.contents.lock().await = Some(text.to_string());
        Ok(())
    }
}

/// Copies a rewrite and reports the outcome. Returns whether the copy succeeded.
pub async fn copy_rewrite(
    suggestion_id: &str,
    text: &str,
    clipboard: &dyn Clipboard,
    notifier: &dyn Notifier,
) -> bool {
    match clipboard.write_text(text).await {
        Ok(()) => {
            notifier.notify(Notification::CopySucceeded {
                suggestion_id: suggestion_id.to_string(),
            });
            true
        }
        Err(e) => {
            notifier.notify(Notification::CopyFailed {
                suggestion_id: suggestion_id.to_string(),
                reason: e.to_string(),
            });
            false
        }
    }
}
