use thiserror::Error;

/// Core domain errors
///
/// Upstream provider failures are not represented here: they are classified
/// as [`ProviderOutcome`](crate::domain::ProviderOutcome) values and absorbed
/// by the fallback chain.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        param: Option<String>,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Validation error pointing at a specific request field
    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            param: Some(param.into()),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
