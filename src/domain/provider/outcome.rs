//! Classified result of one upstream call

use std::fmt;

/// Outcome of a single provider invocation
///
/// Only `Success` ends the fallback chain; every other variant advances it.
/// None of these are ever shown to the end user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Success { reply_text: String },
    AuthFailure,
    RateLimited,
    /// Connection failure or timeout
    Unavailable,
    UnknownError { detail: String },
}

impl ProviderOutcome {
    pub fn success(reply_text: impl Into<String>) -> Self {
        Self::Success {
            reply_text: reply_text.into(),
        }
    }

    pub fn unknown(detail: impl Into<String>) -> Self {
        Self::UnknownError {
            detail: detail.into(),
        }
    }

    /// Classify a non-2xx upstream status
    pub fn from_error_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::AuthFailure,
            429 => Self::RateLimited,
            _ => Self::unknown(format!("HTTP {}: {}", status, truncate(body, 200))),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::AuthFailure => "auth_failure",
            Self::RateLimited => "rate_limited",
            Self::Unavailable => "unavailable",
            Self::UnknownError { .. } => "unknown_error",
        }
    }

    pub fn into_reply_text(self) -> Option<String> {
        match self {
            Self::Success { reply_text } => Some(reply_text),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownError { detail } => write!(f, "unknown_error ({})", detail),
            other => f.write_str(other.kind()),
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
