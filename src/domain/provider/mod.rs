//! Upstream provider domain - descriptors, outcomes and the invoker seam

mod descriptor;
mod invoker;
mod outcome;

pub use descriptor::{Credential, ProviderDescriptor, ProviderKind, ProviderSet};
pub use invoker::UpstreamInvoker;
pub use outcome::ProviderOutcome;

#[cfg(test)]
pub use invoker::MockUpstreamInvoker;
