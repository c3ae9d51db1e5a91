//! MindSpark chat-relay gateway
//!
//! Relays a chat message to LLM providers in priority order:
//! - OpenAI and Groq (chat-completions wire format)
//! - Hugging Face inference
//! - a local rule-based responder when every provider fails

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{ChainConfig, FallbackChain, LocalResponder, RuleSet};
use infrastructure::llm::{HttpClient, HttpInvoker};
use infrastructure::providers::EnvProviderLoader;
use tracing::info;

/// Build the fallback chain from configuration and the process environment
pub fn create_chain(config: &AppConfig) -> anyhow::Result<FallbackChain> {
    let providers = EnvProviderLoader::from_env().load(&config.chat.provider_order)?;

    let rules = match &config.chat.rules_path {
        Some(path) => {
            info!(path = %path.display(), "Loading local rules file");
            RuleSet::from_file(path)?
        }
        None => RuleSet::builtin(),
    };

    info!(
        providers = ?providers.enabled_names(),
        local_rules = rules.len(),
        "Fallback chain ready"
    );

    Ok(FallbackChain::new(
        Arc::new(providers),
        Arc::new(HttpInvoker::new(HttpClient::new())),
        Arc::new(LocalResponder::new(rules, Arc::new(domain::responder::RandomSelector))),
        ChainConfig {
            outer_margin: config.chat.outer_margin(),
            outer_deadline: config.chat.outer_deadline(),
        },
    ))
}

/// Create the application state with custom configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let chain = create_chain(config)?;

    Ok(AppState::new(Arc::new(chain)).with_badges(config.chat.show_badges))
}
