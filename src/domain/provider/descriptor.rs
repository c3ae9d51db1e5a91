//! Provider descriptors - static per-upstream configuration

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::DomainError;

/// Wire format spoken by an upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// OpenAI chat-completions compatible (OpenAI, Groq)
    OpenAi,
    /// Hugging Face text-generation inference
    HuggingFace,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::HuggingFace => "huggingface",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" | "openai-compatible" | "groq" => Ok(Self::OpenAi),
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            other => Err(DomainError::configuration(format!(
                "Unknown provider kind: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque provider secret. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Static configuration for one upstream provider
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    name: String,
    kind: ProviderKind,
    endpoint: String,
    credential: Option<Credential>,
    model: String,
    system_prompt: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
    badge: Option<String>,
}

impl ProviderDescriptor {
    pub const DEFAULT_MAX_TOKENS: u32 = 500;
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(
        name: impl Into<String>,
        kind: ProviderKind,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            endpoint: endpoint.into(),
            credential: None,
            model: model.into(),
            system_prompt: String::new(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            temperature: Self::DEFAULT_TEMPERATURE,
            timeout: Self::DEFAULT_TIMEOUT,
            badge: None,
        }
    }

    pub fn with_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn badge(&self) -> Option<&str> {
        self.badge.as_deref()
    }

    /// A descriptor without a usable credential is left out of the chain
    pub fn is_enabled(&self) -> bool {
        self.credential.as_ref().is_some_and(|c| !c.is_blank())
    }

    /// Check the numeric limits and identifiers
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::configuration("Provider name cannot be empty"));
        }

        if self.endpoint.trim().is_empty() {
            return Err(DomainError::configuration(format!(
                "Provider '{}' has no endpoint",
                self.name
            )));
        }

        if self.model.trim().is_empty() {
            return Err(DomainError::configuration(format!(
                "Provider '{}' has no model",
                self.name
            )));
        }

        if self.max_tokens == 0 {
            return Err(DomainError::configuration(format!(
                "Provider '{}' max_tokens must be positive",
                self.name
            )));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(DomainError::configuration(format!(
                "Provider '{}' temperature {} is outside [0, 2]",
                self.name, self.temperature
            )));
        }

        if self.timeout.is_zero() {
            return Err(DomainError::configuration(format!(
                "Provider '{}' timeout must be positive",
                self.name
            )));
        }

        Ok(())
    }
}

/// Ordered, validated set of provider descriptors
///
/// Declaration order is priority order. The set is built once at startup and
/// shared read-only.
#[derive(Debug, Clone, Default)]
pub struct ProviderSet {
    descriptors: Vec<ProviderDescriptor>,
}

impl ProviderSet {
    pub fn new(descriptors: Vec<ProviderDescriptor>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();

        for descriptor in &descriptors {
            descriptor.validate()?;

            if !seen.insert(descriptor.name().to_string()) {
                return Err(DomainError::configuration(format!(
                    "Duplicate provider name: {}",
                    descriptor.name()
                )));
            }
        }

        Ok(Self { descriptors })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// All descriptors in priority order, enabled or not
    pub fn all(&self) -> &[ProviderDescriptor] {
        &self.descriptors
    }

    /// Enabled descriptors in priority order
    pub fn enabled(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.descriptors.iter().filter(|d| d.is_enabled())
    }

    pub fn enabled_names(&self) -> Vec<&str> {
        self.enabled().map(|d| d.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ProviderDescriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    /// Sum of the timeouts of every enabled descriptor
    pub fn total_timeout(&self) -> Duration {
        self.enabled().map(|d| d.timeout()).sum()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
