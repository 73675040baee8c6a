//! Notification kind classification
//!
//! The kind of a notification decides how it is presented and how long it lives:
//! - SUCCESS / WARNING / INFO: transient, auto-expire by default
//! - ERROR: persists until dismissed or removed by code

/// Notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }

    /// Heading shown when a record carries no title of its own
    pub fn default_title(&self) -> &'static str {
        match self {
            NotificationKind::Success => "Success",
            NotificationKind::Error => "Error",
            NotificationKind::Warning => "Warning",
            NotificationKind::Info => "Info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "✅",
            NotificationKind::Error => "❌",
            NotificationKind::Warning => "⚠️",
            NotificationKind::Info => "ℹ️",
        }
    }

    /// Auto-expire default applied by the dispatcher helpers.
    ///
    /// Errors stay on screen until the user dismisses them.
    pub fn default_auto_expire(&self) -> bool {
        !matches!(self, NotificationKind::Error)
    }
}
