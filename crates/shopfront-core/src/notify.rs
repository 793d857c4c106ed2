//! Toast notifications.

use serde::{Deserialize, Serialize};

/// Tone of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    /// Background color the toast is drawn with.
    pub fn background(&self) -> &'static str {
        match self {
            Self::Success => "green",
            Self::Error => "red",
            Self::Info => "blue",
        }
    }

    /// CSS class suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// A transient message in the corner of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Message text.
    pub text: String,
    /// Time on screen before it dismisses itself.
    pub duration_ms: u32,
    /// Tone.
    pub kind: ToastKind,
}

impl Toast {
    /// Create a toast.
    pub fn new(text: impl Into<String>, kind: ToastKind, duration_ms: u32) -> Self {
        Self {
            text: text.into(),
            duration_ms,
            kind,
        }
    }
}
