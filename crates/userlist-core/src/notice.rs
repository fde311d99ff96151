//! User-visible notices.
//!
//! Delete and update outcomes are reported to the user as a blocking notice
//! (title + message). The `Notifier` trait is the seam between the use case
//! and whatever front end shows them.

use serde::Serialize;
use std::fmt;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    /// The title shown above the message.
    pub fn title(self) -> &'static str {
        match self {
            NoticeLevel::Success => "Success",
            NoticeLevel::Error => "Error",
        }
    }
}

/// A single notice to present to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.level.title()
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message)
    }
}

/// Delivers notices to the user.
///
/// Implementations must not block the caller; the use case calls `notify`
/// while it is finishing an operation.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_display() {
        assert_eq!(
            Notice::success("User deleted successfully").to_string(),
            "Success: User deleted successfully"
        );
        let notice = Notice::error("Failed to delete user");
        assert!(notice.is_error());
        assert_eq!(notice.title(), "Error");
    }
}
