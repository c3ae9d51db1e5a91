//! Built-in MindSpark rule table

use super::{IntentRule, Predicate, Template};

const GREETINGS: &[&str] = &[
    "Hello! I'm MindSpark AI. How can I help you today?",
    "Hi there! Ready to chat or need coding help?",
    "Hey! I'm here to help with programming or just chat!",
];

/// Conditional rules in evaluation order
pub(super) fn conditional_rules() -> Vec<IntentRule> {
    vec![
        IntentRule::new(
            "greeting",
            Predicate::any_contains(&["hello", "hi", "hey"]),
            Template::variants(GREETINGS),
        ),
        IntentRule::new(
            "todo_app",
            Predicate::all_of(vec![
                Predicate::contains("todo"),
                Predicate::any_contains(&["app", "build", "add"]),
            ]),
            Template::text(include_str!("templates/todo.md")),
        ),
        IntentRule::new(
            "dom",
            Predicate::contains("dom"),
            Template::text(include_str!("templates/dom.md")),
        ),
        IntentRule::new(
            "function",
            Predicate::contains("function"),
            Template::text(include_str!("templates/function.md")),
        ),
        IntentRule::new(
            "array",
            Predicate::contains("array"),
            Template::text(include_str!("templates/array.md")),
        ),
        IntentRule::new(
            "event",
            Predicate::contains("event"),
            Template::text(include_str!("templates/event.md")),
        ),
        IntentRule::new(
            "css",
            Predicate::any_contains(&["css", "style"]),
            Template::text(include_str!("templates/css.md")),
        ),
        IntentRule::new(
            "debugging",
            Predicate::any_contains(&["error", "bug", "debug", "not working"]),
            Template::text(include_str!("templates/debugging.md")),
        ),
        IntentRule::new(
            "programming_help",
            Predicate::any_contains(&["code", "program", "javascript", "js", "help"]),
            Template::text(include_str!("templates/programming_help.md")),
        ),
    ]
}

pub(super) fn fallback_rule() -> IntentRule {
    IntentRule::new(
        "default",
        Predicate::Always,
        Template::text(include_str!("templates/default.md")),
    )
}
