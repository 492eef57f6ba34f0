// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct and `Severity` enum
//! used throughout the notification system.

use std::fmt;
use std::time::Duration;

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Severity level determines visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully.
    #[default]
    Success,
    /// Informational message.
    Info,
    /// Something went wrong. Still transient, like every toast.
    Error,
}

impl Severity {
    /// Style hint for the render layer.
    #[must_use]
    pub fn tone(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Error => "error",
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    /// Display text, already final.
    text: String,
    /// Custom auto-dismiss duration (overrides the manager default).
    custom_dismiss_duration: Option<Duration>,
}

impl Notification {
    /// Creates a new notification with the given severity and text.
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            text: text.into(),
            custom_dismiss_duration: None,
        }
    }

    /// Creates a success notification.
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Severity::Success, text)
    }

    /// Creates an info notification.
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    /// Creates an error notification.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text)
    }

    /// Sets a custom auto-dismiss duration, overriding the manager default.
    #[must_use]
    pub fn auto_dismiss(mut self, duration: Duration) -> Self {
        self.custom_dismiss_duration = Some(duration);
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the custom auto-dismiss duration, if any.
    #[must_use]
    pub fn custom_dismiss_duration(&self) -> Option<Duration> {
        self.custom_dismiss_duration
    }
}
