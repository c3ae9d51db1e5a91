//! Chat request and reply value objects

mod reply;
mod request;

pub use reply::{ChatReply, ReplySource};
pub use request::ChatRequest;
