//! Navigation guard for destructive links

/// Prompt shown before following a delete link
pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete this item? This action cannot be undone.";

/// What to do with a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Follow the path right away
    Proceed(String),
    /// Ask first; follow the path unmodified only if accepted
    Confirm(String),
}

/// Intercept any path containing `delete`
pub fn guard(path: &str) -> LinkOutcome {
    if path.contains("delete") {
        LinkOutcome::Confirm(path.to_string())
    } else {
        LinkOutcome::Proceed(path.to_string())
    }
}
