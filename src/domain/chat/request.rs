use crate::domain::DomainError;

/// A single inbound chat message
///
/// The text is kept exactly as sent; only emptiness is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    message: String,
}

impl ChatRequest {
    /// Create a request, rejecting empty or whitespace-only messages
    pub fn new(message: impl Into<String>) -> Result<Self, DomainError> {
        let message = message.into();

        if message.trim().is_empty() {
            return Err(DomainError::invalid_param(
                "message",
                "Message cannot be empty",
            ));
        }

        Ok(Self { message })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Length of the message in bytes, used for payload logging
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.message.len()
    }
}

impl TryFrom<String> for ChatRequest {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_message() {
        let request = ChatRequest::new("How do I use arrays?").unwrap();
        assert_eq!(request.message(), "How do I use arrays?");
        assert_eq!(request.len(), 20);
    }

    #[test]
    fn test_message_is_not_trimmed() {
        let request = ChatRequest::new("  hi  ").unwrap();
        assert_eq!(request.message(), "  hi  ");
    }

    #[test]
    fn test_empty_message_rejected() {
        let err = ChatRequest::new("").unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn test_whitespace_message_rejected() {
        for input in [" ", "\n\t", "   \r\n  "] {
            assert!(ChatRequest::new(input).is_err(), "accepted {input:?}");
        }
    }
}
