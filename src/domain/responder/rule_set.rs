//! Ordered intent rule table

use std::path::Path;

use serde::Deserialize;

use super::{IntentRule, builtin};
use crate::domain::DomainError;

/// First-match-wins rule table with a mandatory unconditional fallback
///
/// The fallback rule is held apart from the conditional rules, so every
/// message resolves to some rule.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<IntentRule>,
    fallback: IntentRule,
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    rules: Vec<IntentRule>,
}

impl RuleSet {
    /// Build a table from rules in priority order
    ///
    /// The last rule must be `always`, no earlier rule may be, and no
    /// template may be blank.
    pub fn new(mut rules: Vec<IntentRule>) -> Result<Self, DomainError> {
        let fallback = rules
            .pop()
            .ok_or_else(|| DomainError::configuration("Rule table is empty"))?;

        if !fallback.predicate.is_always() {
            return Err(DomainError::configuration(format!(
                "Last rule '{}' must use the 'always' predicate",
                fallback.name
            )));
        }

        if let Some(shadowing) = rules.iter().find(|r| r.predicate.is_always()) {
            return Err(DomainError::configuration(format!(
                "Rule '{}' always matches and hides the rules after it",
                shadowing.name
            )));
        }

        if let Some(blank) = rules
            .iter()
            .chain(std::iter::once(&fallback))
            .find(|r| r.template.is_blank())
        {
            return Err(DomainError::configuration(format!(
                "Rule '{}' has an empty template",
                blank.name
            )));
        }

        Ok(Self { rules, fallback })
    }

    /// The rule table shipped with the gateway
    pub fn builtin() -> Self {
        Self {
            rules: builtin::conditional_rules(),
            fallback: builtin::fallback_rule(),
        }
    }

    /// Parse a TOML rule table (`[[rules]]` entries)
    pub fn from_toml_str(input: &str) -> Result<Self, DomainError> {
        let file: RuleFile = toml::from_str(input)
            .map_err(|e| DomainError::configuration(format!("Invalid rules file: {}", e)))?;

        Self::new(file.rules)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read rules file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// First rule matching the message, or the fallback
    pub fn find_match(&self, message: &str) -> &IntentRule {
        let lowered = message.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .unwrap_or(&self.fallback)
    }

    /// Conditional rules followed by the fallback, in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = &IntentRule> {
        self.rules.iter().chain(std::iter::once(&self.fallback))
    }

    /// Rule count including the fallback, so never zero
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.rules.len() + 1
    }
}
