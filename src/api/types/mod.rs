//! API request, response and error types

pub mod chat;
pub mod error;
pub mod json;

pub use chat::{ChatPayload, ChatResponse};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
