//! Hugging Face text-generation inference wire format

use serde::Deserialize;

use crate::domain::{ChatRequest, ProviderDescriptor};

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: Option<String>,
}

/// Inference API answers with either a list of generations or a single one
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HuggingFaceResponse {
    Many(Vec<Generation>),
    One(Generation),
}

pub(super) fn build_request(descriptor: &ProviderDescriptor, request: &ChatRequest) -> serde_json::Value {
    let inputs = if descriptor.system_prompt().is_empty() {
        request.message().to_string()
    } else {
        format!("{}\n\n{}", descriptor.system_prompt(), request.message())
    };

    serde_json::json!({
        "inputs": inputs,
        "parameters": {
            "max_new_tokens": descriptor.max_tokens(),
            "temperature": descriptor.temperature(),
            "return_full_text": false,
        },
        "options": {
            "wait_for_model": false,
        },
    })
}

/// Extract `[0].generated_text` (or `generated_text` for an object body)
pub(super) fn parse_reply(body: &str) -> Result<String, String> {
    let response: HuggingFaceResponse =
        serde_json::from_str(body).map_err(|e| format!("Failed to parse response: {}", e))?;

    let generation = match response {
        HuggingFaceResponse::Many(generations) => generations.into_iter().next(),
        HuggingFaceResponse::One(generation) => Some(generation),
    };

    generation
        .and_then(|g| g.generated_text)
        .ok_or_else(|| "No generated_text in response".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProviderKind;

    fn descriptor() -> ProviderDescriptor {
        ProviderDescriptor::new(
            "huggingface",
            ProviderKind::HuggingFace,
            "https://api-inference.huggingface.co/models/microsoft/DialoGPT-large",
            "microsoft/DialoGPT-large",
        )
        .with_max_tokens(200)
    }

    #[test]
    fn test_build_request() {
        let request = ChatRequest::new("Tell me about arrays").unwrap();
        let body = build_request(&descriptor().with_system_prompt("Be brief."), &request);

        assert_eq!(body["inputs"], "Be brief.\n\nTell me about arrays");
        assert_eq!(body["parameters"]["max_new_tokens"], 200);
        assert_eq!(body["parameters"]["return_full_text"], false);
        assert_eq!(body["options"]["wait_for_model"], false);
    }

    #[test]
    fn test_build_request_without_system_prompt() {
        let request = ChatRequest::new("hello").unwrap();
        let body = build_request(&descriptor().with_system_prompt(""), &request);
        assert_eq!(body["inputs"], "hello");
    }

    #[test]
    fn test_parse_list_reply() {
        let body = r#"[{"generated_text": "Arrays hold ordered values."}]"#;
        assert_eq!(parse_reply(body).unwrap(), "Arrays hold ordered values.");
    }

    #[test]
    fn test_parse_object_reply() {
        let body = r#"{"generated_text": "Sure."}"#;
        assert_eq!(parse_reply(body).unwrap(), "Sure.");
    }

    #[test]
    fn test_parse_loading_error_body() {
        let body = r#"{"error": "Model is currently loading", "estimated_time": 20.0}"#;
        assert!(parse_reply(body).is_err());
        assert!(parse_reply("[]").is_err());
    }
}
