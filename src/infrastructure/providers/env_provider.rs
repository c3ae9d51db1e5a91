use std::str::FromStr;
use std::time::Duration;

use crate::domain::{Credential, DomainError, ProviderDescriptor, ProviderKind, ProviderSet};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are MindSpark AI, a helpful programming mentor. \
Provide clear, concise, and practical coding help with examples. Keep responses focused and \
readable - aim for 200-400 words with 1-2 code examples. Be enthusiastic but concise!";

/// Built-in settings for one provider before environment overrides
#[derive(Debug, Clone)]
pub struct ProviderDefaults {
    pub name: &'static str,
    /// Environment variable prefix, e.g. `GROQ` for `GROQ_API_KEY`
    pub env_prefix: &'static str,
    pub kind: ProviderKind,
    pub endpoint: &'static str,
    pub model: &'static str,
    pub max_tokens: u32,
    pub badge: &'static str,
}

/// The providers known out of the box, in default priority order
pub fn builtin_providers() -> Vec<ProviderDefaults> {
    vec![
        ProviderDefaults {
            name: "openai",
            env_prefix: "OPENAI",
            kind: ProviderKind::OpenAi,
            endpoint: "https://api.openai.com/v1/chat/completions",
            model: "gpt-4o-mini",
            max_tokens: 500,
            badge: "🤖 **[OpenAI GPT-4]**",
        },
        ProviderDefaults {
            name: "groq",
            env_prefix: "GROQ",
            kind: ProviderKind::OpenAi,
            endpoint: "https://api.groq.com/openai/v1/chat/completions",
            model: "llama-3.1-8b-instant",
            max_tokens: 600,
            badge: "🚀 **[Groq Llama3]**",
        },
        ProviderDefaults {
            name: "huggingface",
            env_prefix: "HUGGINGFACE",
            kind: ProviderKind::HuggingFace,
            endpoint: "https://api-inference.huggingface.co/models/microsoft/DialoGPT-large",
            model: "microsoft/DialoGPT-large",
            max_tokens: 200,
            badge: "🤗 **[Hugging Face]**",
        },
    ]
}

/// Builds the provider set from environment variables
///
/// The lookup is injectable so tests never touch the process environment.
pub struct EnvProviderLoader<F>
where
    F: Fn(&str) -> Option<String>,
{
    lookup: F,
    defaults: Vec<ProviderDefaults>,
}

impl EnvProviderLoader<fn(&str) -> Option<String>> {
    /// Read from the process environment
    pub fn from_env() -> Self {
        Self::new(|key: &str| std::env::var(key).ok())
    }
}

impl<F> EnvProviderLoader<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        Self {
            lookup,
            defaults: builtin_providers(),
        }
    }

    /// Load descriptors in `order` (provider names); an empty order means
    /// the built-in order
    pub fn load(&self, order: &[String]) -> Result<ProviderSet, DomainError> {
        let selected: Vec<&ProviderDefaults> = if order.is_empty() {
            self.defaults.iter().collect()
        } else {
            order
                .iter()
                .map(|name| {
                    let name = name.trim().to_lowercase();
                    self.defaults.iter().find(|d| d.name == name).ok_or_else(|| {
                        DomainError::configuration(format!("Unknown provider '{}' in provider order", name))
                    })
                })
                .collect::<Result<_, _>>()?
        };

        let descriptors = selected
            .into_iter()
            .map(|defaults| self.descriptor(defaults))
            .collect::<Result<Vec<_>, _>>()?;

        let set = ProviderSet::new(descriptors)?;

        for descriptor in set.all() {
            if descriptor.is_enabled() {
                tracing::info!(provider = %descriptor.name(), model = %descriptor.model(), "Provider enabled");
            } else {
                tracing::info!(provider = %descriptor.name(), "Provider disabled, no credential");
            }
        }

        Ok(set)
    }

    fn descriptor(&self, defaults: &ProviderDefaults) -> Result<ProviderDescriptor, DomainError> {
        let prefix = defaults.env_prefix;

        let credential = self
            .var(&format!("{}_API_KEY", prefix))
            .map(Credential::new);

        let mut descriptor =
            ProviderDescriptor::new(defaults.name, defaults.kind, defaults.endpoint, defaults.model)
                .with_credential(credential)
                .with_max_tokens(defaults.max_tokens)
                .with_system_prompt(DEFAULT_SYSTEM_PROMPT)
                .with_badge(defaults.badge);

        if let Some(model) = self.var(&format!("{}_MODEL", prefix)) {
            descriptor = descriptor.with_model(model);
        }

        if let Some(endpoint) = self.var(&format!("{}_ENDPOINT", prefix)) {
            descriptor = descriptor.with_endpoint(endpoint);
        }

        if let Some(prompt) = self.var(&format!("{}_SYSTEM_PROMPT", prefix)) {
            descriptor = descriptor.with_system_prompt(prompt);
        }

        if let Some(max_tokens) = self.parsed::<u32>(&format!("{}_MAX_TOKENS", prefix))? {
            descriptor = descriptor.with_max_tokens(max_tokens);
        }

        if let Some(temperature) = self.parsed::<f32>(&format!("{}_TEMPERATURE", prefix))? {
            descriptor = descriptor.with_temperature(temperature);
        }

        if let Some(timeout_ms) = self.parsed::<u64>(&format!("{}_TIMEOUT_MS", prefix))? {
            descriptor = descriptor.with_timeout(Duration::from_millis(timeout_ms));
        }

        Ok(descriptor)
    }

    /// Non-blank variable value
    fn var(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>, DomainError>
    where
        T::Err: std::fmt::Display,
    {
        self.var(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| {
                    DomainError::configuration(format!("Invalid value '{}' for {}: {}", raw, key, e))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn loader(vars: &[(&str, &str)]) -> EnvProviderLoader<impl Fn(&str) -> Option<String>> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        EnvProviderLoader::new(move |key: &str| vars.get(key).cloned())
    }

    #[test]
    fn test_no_credentials_disables_everything() {
        let set = loader(&[]).load(&[]).unwrap();

        assert_eq!(set.len(), 3);
        assert!(set.enabled_names().is_empty());
    }

    #[test]
    fn test_defaults() {
        let set = loader(&[("GROQ_API_KEY", "gsk-1")]).load(&[]).unwrap();

        assert_eq!(set.enabled_names(), vec!["groq"]);

        let groq = set.get("groq").unwrap();
        assert_eq!(groq.model(), "llama-3.1-8b-instant");
        assert_eq!(groq.max_tokens(), 600);
        assert_eq!(groq.timeout(), Duration::from_secs(30));
        assert_eq!(groq.badge(), Some("🚀 **[Groq Llama3]**"));
        assert_eq!(groq.credential().unwrap().expose(), "gsk-1");

        let hf = set.get("huggingface").unwrap();
        assert_eq!(hf.kind(), ProviderKind::HuggingFace);
        assert_eq!(hf.max_tokens(), 200);
    }

    #[test]
    fn test_blank_credential_is_disabled() {
        let set = loader(&[("OPENAI_API_KEY", "   ")]).load(&[]).unwrap();
        assert!(!set.get("openai").unwrap().is_enabled());
    }

    #[test]
    fn test_overrides() {
        let set = loader(&[
            ("OPENAI_API_KEY", "sk-1"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("OPENAI_ENDPOINT", "http://localhost:9000/v1/chat/completions"),
            ("OPENAI_MAX_TOKENS", "1000"),
            ("OPENAI_TEMPERATURE", "0.2"),
            ("OPENAI_TIMEOUT_MS", "1500"),
            ("OPENAI_SYSTEM_PROMPT", "Be terse."),
        ])
        .load(&[])
        .unwrap();

        let openai = set.get("openai").unwrap();
        assert_eq!(openai.model(), "gpt-4o");
        assert_eq!(openai.endpoint(), "http://localhost:9000/v1/chat/completions");
        assert_eq!(openai.max_tokens(), 1000);
        assert!((openai.temperature() - 0.2).abs() < f32::EPSILON);
        assert_eq!(openai.timeout(), Duration::from_millis(1500));
        assert_eq!(openai.system_prompt(), "Be terse.");
    }

    #[test]
    fn test_unparseable_override_is_an_error() {
        let err = loader(&[("GROQ_MAX_TOKENS", "lots")]).load(&[]).unwrap_err();
        assert!(err.to_string().contains("GROQ_MAX_TOKENS"));
    }

    #[test]
    fn test_out_of_range_override_is_an_error() {
        assert!(loader(&[("GROQ_TEMPERATURE", "3.5")]).load(&[]).is_err());
        assert!(loader(&[("OPENAI_MAX_TOKENS", "0")]).load(&[]).is_err());
        assert!(loader(&[("HUGGINGFACE_TIMEOUT_MS", "0")]).load(&[]).is_err());
    }

    #[test]
    fn test_custom_order() {
        let order = vec!["Groq".to_string(), "openai".to_string()];
        let set = loader(&[("OPENAI_API_KEY", "a"), ("GROQ_API_KEY", "b")])
            .load(&order)
            .unwrap();

        assert_eq!(set.enabled_names(), vec!["groq", "openai"]);
        assert!(set.get("huggingface").is_none());
    }

    #[test]
    fn test_unknown_provider_in_order() {
        let err = loader(&[]).load(&["anthropic".to_string()]).unwrap_err();
        assert!(err.to_string().contains("anthropic"));
    }

    #[test]
    fn test_duplicate_provider_in_order() {
        let order = vec!["groq".to_string(), "groq".to_string()];
        assert!(loader(&[]).load(&order).is_err());
    }
}
