use std::fmt;

/// Where a reply came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    /// An upstream provider, by descriptor name
    Provider(String),
    /// The local rule-based responder
    Local,
}

impl ReplySource {
    pub fn provider(name: impl Into<String>) -> Self {
        Self::Provider(name.into())
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    /// Tag used in logs and metric labels
    pub fn tag(&self) -> &str {
        match self {
            Self::Provider(name) => name,
            Self::Local => "local",
        }
    }
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The text returned to the caller, together with its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
}

impl ChatReply {
    pub fn from_provider(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ReplySource::provider(name),
        }
    }

    pub fn local(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ReplySource::Local,
        }
    }

    /// Render the reply text, optionally prefixed with a display badge
    pub fn render(&self, badge: Option<&str>) -> String {
        match badge {
            Some(badge) if !badge.is_empty() => format!("{} {}", badge, self.text),
            _ => self.text.clone(),
        }
    }
}
