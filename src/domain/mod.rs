//! Domain layer - Core chat relay types and logic

pub mod chain;
pub mod chat;
pub mod error;
pub mod provider;
pub mod responder;

pub use chain::{AttemptRecord, ChainConfig, ChainResult, FallbackChain};
pub use chat::{ChatReply, ChatRequest, ReplySource};
pub use error::DomainError;
pub use provider::{
    Credential, ProviderDescriptor, ProviderKind, ProviderOutcome, ProviderSet, UpstreamInvoker,
};
pub use responder::{LocalResponder, LocalResponse, RuleSet};
