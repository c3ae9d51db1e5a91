//! HTTP implementation of the upstream invoker

use async_trait::async_trait;

use super::http_client::{HttpClientTrait, TransportError};
use super::{huggingface, openai};
use crate::domain::{ChatRequest, ProviderDescriptor, ProviderKind, ProviderOutcome, UpstreamInvoker};

/// Calls providers over HTTP and classifies every result
#[derive(Debug)]
pub struct HttpInvoker<C: HttpClientTrait> {
    client: C,
}

impl<C: HttpClientTrait> HttpInvoker<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    fn build_request(descriptor: &ProviderDescriptor, request: &ChatRequest) -> serde_json::Value {
        match descriptor.kind() {
            ProviderKind::OpenAi => openai::build_request(descriptor, request),
            ProviderKind::HuggingFace => huggingface::build_request(descriptor, request),
        }
    }

    fn parse_reply(descriptor: &ProviderDescriptor, body: &str) -> ProviderOutcome {
        let parsed = match descriptor.kind() {
            ProviderKind::OpenAi => openai::parse_reply(body),
            ProviderKind::HuggingFace => huggingface::parse_reply(body),
        };

        match parsed {
            Ok(text) if !text.trim().is_empty() => ProviderOutcome::success(text.trim()),
            Ok(_) => ProviderOutcome::unknown("Empty reply"),
            Err(detail) => ProviderOutcome::unknown(detail),
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> UpstreamInvoker for HttpInvoker<C> {
    async fn invoke(&self, descriptor: &ProviderDescriptor, request: &ChatRequest) -> ProviderOutcome {
        let Some(credential) = descriptor.credential() else {
            return ProviderOutcome::AuthFailure;
        };

        let auth_header = format!("Bearer {}", credential.expose());
        let headers = vec![
            ("Authorization", auth_header.as_str()),
            ("Content-Type", "application/json"),
        ];
        let body = Self::build_request(descriptor, request);

        tracing::debug!(
            provider = %descriptor.name(),
            model = %descriptor.model(),
            endpoint = %descriptor.endpoint(),
            "Calling provider"
        );

        let response = match self
            .client
            .post_json(descriptor.endpoint(), headers, &body, descriptor.timeout())
            .await
        {
            Ok(response) => response,
            Err(TransportError::Timeout) => return ProviderOutcome::Unavailable,
            Err(TransportError::Request(e)) => {
                tracing::debug!(provider = %descriptor.name(), error = %e, "Provider unreachable");
                return ProviderOutcome::Unavailable;
            }
        };

        if !response.is_success() {
            return ProviderOutcome::from_error_status(response.status, &response.body);
        }

        Self::parse_reply(descriptor, &response.body)
    }
}
