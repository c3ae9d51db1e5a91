//! Local rule-based responder used when every upstream provider fails

mod builtin;
mod rule;
mod rule_set;
mod selector;

use std::sync::Arc;

pub use rule::{IntentRule, MESSAGE_PLACEHOLDER, Predicate, Template};
pub use rule_set::RuleSet;
pub use selector::{FixedSelector, RandomSelector, VariantSelector};

use crate::domain::chat::ChatRequest;

/// Reply produced by the local responder together with the rule that made it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalResponse {
    pub rule: String,
    pub text: String,
}

/// Deterministic (up to variant selection) keyword responder
#[derive(Debug, Clone)]
pub struct LocalResponder {
    rules: RuleSet,
    selector: Arc<dyn VariantSelector>,
}

impl LocalResponder {
    pub fn new(rules: RuleSet, selector: Arc<dyn VariantSelector>) -> Self {
        Self { rules, selector }
    }

    /// Built-in rule table with random variant selection
    pub fn builtin() -> Self {
        Self::new(RuleSet::builtin(), Arc::new(RandomSelector))
    }

    pub fn with_selector(mut self, selector: Arc<dyn VariantSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Classify the message and render the first matching rule
    pub fn respond(&self, request: &ChatRequest) -> LocalResponse {
        let message = request.message();
        let rule = self.rules.find_match(message);

        LocalResponse {
            rule: rule.name.clone(),
            text: rule.template.render(message, self.selector.as_ref()),
        }
    }

    /// Reply text only
    pub fn generate(&self, request: &ChatRequest) -> String {
        self.respond(request).text
    }
}

impl Default for LocalResponder {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn request(message: &str) -> ChatRequest {
        ChatRequest::new(message).unwrap()
    }

    fn responder() -> LocalResponder {
        LocalResponder::builtin().with_selector(Arc::new(FixedSelector(0)))
    }

    #[test]
    fn test_greeting_variant_follows_selector() {
        let first = responder().respond(&request("hello"));
        assert_eq!(first.rule, "greeting");
        assert_eq!(
            first.text,
            "Hello! I'm MindSpark AI. How can I help you today?"
        );

        let third = LocalResponder::builtin()
            .with_selector(Arc::new(FixedSelector(2)))
            .generate(&request("hey"));
        assert_eq!(
            third,
            "Hey! I'm here to help with programming or just chat!"
        );
    }

    #[test]
    fn test_todo_reply() {
        let reply = responder().respond(&request("how do I build a todo app"));
        assert_eq!(reply.rule, "todo_app");
        assert!(reply.text.to_lowercase().contains("todo"));
    }

    #[test]
    fn test_default_reply_echoes_message() {
        let reply = responder().respond(&request("xyzzy plugh"));
        assert_eq!(reply.rule, "default");
        assert!(reply.text.contains("xyzzy plugh"));
        assert!(!reply.text.contains(MESSAGE_PLACEHOLDER));
    }

    #[test]
    fn test_same_input_same_reply() {
        let responder = responder();
        let a = responder.generate(&request("Explain DOM manipulation"));
        let b = responder.generate(&request("Explain DOM manipulation"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_messages_always_get_text() {
        let mut rng = StdRng::seed_from_u64(7);
        let responder = LocalResponder::builtin();
        let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz ABCXYZ0123!?.,-".chars().collect();

        for _ in 0..500 {
            let len = rng.gen_range(1..60);
            let mut message: String = (0..len)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect();
            if message.trim().is_empty() {
                message.push('x');
            }

            let reply = responder.generate(&request(&message));
            assert!(!reply.trim().is_empty(), "empty reply for {:?}", message);
        }
    }

    #[test]
    fn test_custom_rule_set() {
        let rules = RuleSet::new(vec![
            IntentRule::new(
                "rust",
                Predicate::contains("rust"),
                Template::text("Rust: {message}"),
            ),
            IntentRule::new("default", Predicate::Always, Template::text("fallback")),
        ])
        .unwrap();

        let responder = LocalResponder::new(rules, Arc::new(FixedSelector(0)));
        assert_eq!(responder.generate(&request("Rust lifetimes")), "Rust: Rust lifetimes");
        assert_eq!(responder.generate(&request("go")), "fallback");
    }
}
