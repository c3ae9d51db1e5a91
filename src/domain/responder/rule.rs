//! Intent rules - keyword predicates bound to reply templates

use serde::{Deserialize, Serialize};

use super::VariantSelector;

/// Placeholder replaced with the caller's original message
pub const MESSAGE_PLACEHOLDER: &str = "{message}";

/// Keyword predicate evaluated against the lowercased message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Substring test
    Contains(String),
    /// Whole-word test; words are runs of alphanumeric characters
    Word(String),
    AnyOf(Vec<Predicate>),
    AllOf(Vec<Predicate>),
    /// Matches every message
    Always,
}

impl Predicate {
    pub fn contains(needle: impl Into<String>) -> Self {
        Self::Contains(needle.into())
    }

    pub fn word(word: impl Into<String>) -> Self {
        Self::Word(word.into())
    }

    /// Any of the given substrings
    pub fn any_contains(needles: &[&str]) -> Self {
        Self::AnyOf(needles.iter().map(|n| Self::contains(*n)).collect())
    }

    pub fn all_of(predicates: Vec<Predicate>) -> Self {
        Self::AllOf(predicates)
    }

    /// Evaluate against text that has already been lowercased
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Self::Contains(needle) => lowered.contains(needle.to_lowercase().as_str()),
            Self::Word(word) => {
                let word = word.to_lowercase();
                lowered
                    .split(|c: char| !c.is_alphanumeric())
                    .any(|token| token == word)
            }
            Self::AnyOf(predicates) => predicates.iter().any(|p| p.matches(lowered)),
            Self::AllOf(predicates) => predicates.iter().all(|p| p.matches(lowered)),
            Self::Always => true,
        }
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }
}

/// Reply producer for a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    Text(String),
    /// One variant is picked by the responder's selector
    Variants(Vec<String>),
}

impl Template {
    pub fn text(text: impl AsRef<str>) -> Self {
        Self::Text(text.as_ref().trim_end().to_string())
    }

    pub fn variants(variants: &[&str]) -> Self {
        Self::Variants(variants.iter().map(|v| v.trim_end().to_string()).collect())
    }

    /// A template that could render to an empty reply
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Variants(variants) => {
                variants.is_empty() || variants.iter().any(|v| v.trim().is_empty())
            }
        }
    }

    /// Produce the reply, echoing `message` into any placeholder
    pub fn render(&self, message: &str, selector: &dyn VariantSelector) -> String {
        let raw = match self {
            Self::Text(text) => text.as_str(),
            Self::Variants(variants) => {
                if variants.is_empty() {
                    return String::new();
                }
                let index = selector.select(variants.len()).min(variants.len() - 1);
                variants[index].as_str()
            }
        };

        raw.replace(MESSAGE_PLACEHOLDER, message)
    }
}

/// A named predicate/template pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRule {
    pub name: String,
    pub predicate: Predicate,
    pub template: Template,
}

impl IntentRule {
    pub fn new(name: impl Into<String>, predicate: Predicate, template: Template) -> Self {
        Self {
            name: name.into(),
            predicate,
            template,
        }
    }

    pub fn matches(&self, lowered: &str) -> bool {
        self.predicate.matches(lowered)
    }
}
