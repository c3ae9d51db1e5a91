//! OpenAI chat-completions wire format (also spoken by Groq)

use serde::Deserialize;

use crate::domain::{ChatRequest, ProviderDescriptor};

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

pub(super) fn build_request(descriptor: &ProviderDescriptor, request: &ChatRequest) -> serde_json::Value {
    let mut messages = Vec::with_capacity(2);

    if !descriptor.system_prompt().is_empty() {
        messages.push(serde_json::json!({
            "role": "system",
            "content": descriptor.system_prompt(),
        }));
    }

    messages.push(serde_json::json!({
        "role": "user",
        "content": request.message(),
    }));

    serde_json::json!({
        "model": descriptor.model(),
        "messages": messages,
        "max_tokens": descriptor.max_tokens(),
        "temperature": descriptor.temperature(),
        "stream": false,
    })
}

/// Extract `choices[0].message.content`
pub(super) fn parse_reply(body: &str) -> Result<String, String> {
    let response: OpenAiResponse =
        serde_json::from_str(body).map_err(|e| format!("Failed to parse response: {}", e))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| "No choices in response".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProviderKind;

    fn descriptor() -> ProviderDescriptor {
        ProviderDescriptor::new(
            "groq",
            ProviderKind::OpenAi,
            "https://api.groq.com/openai/v1/chat/completions",
            "llama-3.1-8b-instant",
        )
        .with_system_prompt("You are MindSpark AI.")
        .with_max_tokens(600)
    }

    #[test]
    fn test_build_request() {
        let request = ChatRequest::new("What is a closure?").unwrap();
        let body = build_request(&descriptor(), &request);

        assert_eq!(body["model"], "llama-3.1-8b-instant");
        assert_eq!(body["max_tokens"], 600);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are MindSpark AI.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "What is a closure?");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_build_request_without_system_prompt() {
        let descriptor = descriptor().with_system_prompt("");
        let request = ChatRequest::new("hi").unwrap();
        let body = build_request(&descriptor, &request);

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
    }

    #[test]
    fn test_parse_reply() {
        let body = serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o-mini",
            "choices": [{
                "message": { "role": "assistant", "content": "A closure captures its scope." },
                "finish_reason": "stop"
            }]
        })
        .to_string();

        assert_eq!(parse_reply(&body).unwrap(), "A closure captures its scope.");
    }

    #[test]
    fn test_parse_reply_without_choices() {
        assert!(parse_reply(r#"{"choices": []}"#).is_err());
        assert!(parse_reply(r#"{"choices": [{"message": {"content": null}}]}"#).is_err());
        assert!(parse_reply("<html>bad gateway</html>").is_err());
    }
}
