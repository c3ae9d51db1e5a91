//! LLM provider infrastructure - HTTP transport and wire formats

mod http_client;
mod huggingface;
mod invoker;
mod openai;

pub use http_client::{HttpClient, HttpClientTrait, HttpResponse, TransportError};
pub use invoker::HttpInvoker;

#[cfg(test)]
pub use http_client::mock;
