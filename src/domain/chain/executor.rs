//! Fallback chain executor - ordered provider attempts with local fallback

use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::counter;
use tokio::time::timeout;

use crate::domain::chat::{ChatReply, ChatRequest};
use crate::domain::provider::{ProviderDescriptor, ProviderOutcome, ProviderSet, UpstreamInvoker};
use crate::domain::responder::LocalResponder;
use crate::domain::DomainError;

/// Configuration for the fallback chain
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Slack added to the sum of provider timeouts to form the outer deadline
    pub outer_margin: Duration,
    /// Fixed outer deadline replacing the computed one
    pub outer_deadline: Option<Duration>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            outer_margin: Duration::from_secs(2),
            outer_deadline: None,
        }
    }
}

/// One provider call made while resolving a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    pub provider: String,
    /// Outcome label, see [`ProviderOutcome::kind`]
    pub outcome: &'static str,
    pub latency_ms: u64,
}

/// Result of resolving one chat request
#[derive(Debug, Clone)]
pub struct ChainResult {
    pub reply: ChatReply,
    /// Attempts in the order they were made
    pub attempts: Vec<AttemptRecord>,
    /// Rule that produced a local reply
    pub local_rule: Option<String>,
    /// Providers skipped because the outer deadline was spent
    pub skipped: Vec<String>,
    pub total_latency_ms: u64,
}

impl ChainResult {
    pub fn is_local(&self) -> bool {
        self.reply.source.is_local()
    }
}

/// Tries each enabled provider once, in order, then answers locally
pub struct FallbackChain {
    providers: Arc<ProviderSet>,
    invoker: Arc<dyn UpstreamInvoker>,
    responder: Arc<LocalResponder>,
    config: ChainConfig,
}

impl std::fmt::Debug for FallbackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackChain")
            .field("providers", &self.providers.enabled_names())
            .field("config", &self.config)
            .finish()
    }
}

impl FallbackChain {
    pub fn new(
        providers: Arc<ProviderSet>,
        invoker: Arc<dyn UpstreamInvoker>,
        responder: Arc<LocalResponder>,
        config: ChainConfig,
    ) -> Self {
        Self {
            providers,
            invoker,
            responder,
            config,
        }
    }

    pub fn providers(&self) -> &ProviderSet {
        &self.providers
    }

    pub fn responder(&self) -> &LocalResponder {
        &self.responder
    }

    /// Upper bound on the time one `resolve` call may spend on providers
    pub fn outer_deadline(&self) -> Duration {
        self.config
            .outer_deadline
            .unwrap_or_else(|| self.providers.total_timeout() + self.config.outer_margin)
    }

    /// Resolve a request to a reply
    ///
    /// Upstream failures never surface here. The only error is an empty
    /// local reply, which a validated rule table cannot produce.
    pub async fn resolve(&self, request: &ChatRequest) -> Result<ChainResult, DomainError> {
        let start = Instant::now();
        let deadline = start + self.outer_deadline();
        let mut attempts = Vec::new();
        let mut skipped = Vec::new();

        for descriptor in self.providers.enabled() {
            let remaining = deadline.saturating_duration_since(Instant::now());

            if remaining.is_zero() {
                skipped.push(descriptor.name().to_string());
                continue;
            }

            let (outcome, latency) = self.attempt(descriptor, request, remaining).await;
            let record = AttemptRecord {
                provider: descriptor.name().to_string(),
                outcome: outcome.kind(),
                latency_ms: latency.as_millis() as u64,
            };

            counter!(
                "chat_provider_attempts_total",
                "provider" => record.provider.clone(),
                "outcome" => record.outcome
            )
            .increment(1);

            attempts.push(record);

            match outcome {
                ProviderOutcome::Success { reply_text } => {
                    tracing::info!(
                        provider = %descriptor.name(),
                        latency_ms = latency.as_millis() as u64,
                        "Provider answered"
                    );

                    return Ok(self.finish(
                        ChatReply::from_provider(descriptor.name(), reply_text),
                        attempts,
                        None,
                        skipped,
                        start,
                    ));
                }
                failure => {
                    tracing::warn!(
                        provider = %descriptor.name(),
                        outcome = %failure,
                        latency_ms = latency.as_millis() as u64,
                        "Provider failed, trying next"
                    );
                }
            }
        }

        if !skipped.is_empty() {
            tracing::warn!(skipped = ?skipped, "Chain deadline spent, skipping providers");
        }

        let local = self.responder.respond(request);

        if local.text.trim().is_empty() {
            tracing::error!(rule = %local.rule, "Local responder produced an empty reply");
            return Err(DomainError::internal(format!(
                "Local rule '{}' produced an empty reply",
                local.rule
            )));
        }

        tracing::info!(
            rule = %local.rule,
            attempted = attempts.len(),
            "Answering with local responder"
        );

        Ok(self.finish(
            ChatReply::local(local.text),
            attempts,
            Some(local.rule),
            skipped,
            start,
        ))
    }

    /// Call one provider, bounded by its own timeout and the remaining budget
    async fn attempt(
        &self,
        descriptor: &ProviderDescriptor,
        request: &ChatRequest,
        remaining: Duration,
    ) -> (ProviderOutcome, Duration) {
        let budget = descriptor.timeout().min(remaining);
        let start = Instant::now();

        let outcome = match timeout(budget, self.invoker.invoke(descriptor, request)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::debug!(
                    provider = %descriptor.name(),
                    budget_ms = budget.as_millis() as u64,
                    "Provider call timed out"
                );
                ProviderOutcome::Unavailable
            }
        };

        (outcome, start.elapsed())
    }

    fn finish(
        &self,
        reply: ChatReply,
        attempts: Vec<AttemptRecord>,
        local_rule: Option<String>,
        skipped: Vec<String>,
        start: Instant,
    ) -> ChainResult {
        counter!("chat_replies_total", "source" => reply.source.tag().to_string()).increment(1);

        ChainResult {
            reply,
            attempts,
            local_rule,
            skipped,
            total_latency_ms: start.elapsed().as_millis() as u64,
        }
    }
}
