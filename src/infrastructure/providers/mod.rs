//! Provider catalog loaded from the environment

mod env_provider;

pub use env_provider::{builtin_providers, EnvProviderLoader, ProviderDefaults, DEFAULT_SYSTEM_PROMPT};
