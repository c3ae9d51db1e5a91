//! Fallback chain domain - ordered provider attempts ending in a local reply

mod executor;

pub use executor::{AttemptRecord, ChainConfig, ChainResult, FallbackChain};
