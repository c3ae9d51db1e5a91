use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{ProviderDescriptor, ProviderOutcome};
use crate::domain::ChatRequest;

/// Performs one call against one provider
///
/// Implementations must enforce `descriptor.timeout()` and resolve every
/// failure into a [`ProviderOutcome`]; they never return an error or panic.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UpstreamInvoker: Send + Sync {
    async fn invoke(
        &self,
        descriptor: &ProviderDescriptor,
        request: &ChatRequest,
    ) -> ProviderOutcome;
}
