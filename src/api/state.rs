//! Application state shared by all handlers

use std::sync::Arc;

use crate::domain::{ChatReply, FallbackChain, ReplySource};
use crate::infrastructure::observability::PrometheusMetrics;

/// Badge shown for replies from the local responder
pub const LOCAL_BADGE: &str = "🧠 **[Smart Local AI]**";

/// Immutable state built once at startup
#[derive(Clone, Debug)]
pub struct AppState {
    pub chain: Arc<FallbackChain>,
    /// Prefix replies with the badge of whoever answered
    pub show_badges: bool,
    pub metrics: Option<PrometheusMetrics>,
}

impl AppState {
    pub fn new(chain: Arc<FallbackChain>) -> Self {
        Self {
            chain,
            show_badges: false,
            metrics: None,
        }
    }

    pub fn with_badges(mut self, show_badges: bool) -> Self {
        self.show_badges = show_badges;
        self
    }

    pub fn with_metrics(mut self, metrics: Option<PrometheusMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Text returned to the caller, badge included when enabled
    pub fn render_reply(&self, reply: &ChatReply) -> String {
        if !self.show_badges {
            return reply.render(None);
        }

        let badge = match &reply.source {
            ReplySource::Local => Some(LOCAL_BADGE),
            ReplySource::Provider(name) => self
                .chain
                .providers()
                .get(name)
                .and_then(|descriptor| descriptor.badge()),
        };

        reply.render(badge)
    }
}
