//! Renderer warnings with colored terminal output.
//!
//! Every condition the renderer recovers from (an unsupported unit, an
//! unknown `display` keyword, an image that failed to decode) is reported
//! here exactly once per unique message, so a large document cannot flood
//! stderr with the same complaint.

use owo_colors::OwoColorize;
use std::collections::HashSet;
use std::sync::{LazyLock, Mutex, PoisonError};

/// Global set of warnings we've already printed (to deduplicate).
static WARNED: LazyLock<Mutex<HashSet<String>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a recovered condition (prints once per unique message).
///
/// # Example
/// ```
/// wren_common::warning::warn_once("CSS", "unsupported unit 'em' in font-size");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key(component, message));

    if should_print {
        eprintln!("{}", format!("[Wren {component}] ⚠ {message}").yellow());
    }
}

/// Whether a warning containing `needle` has been emitted for `component`
/// since the last [`clear_warnings`].
#[must_use]
pub fn has_warned(component: &str, needle: &str) -> bool {
    let prefix = key(component, "");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .any(|w| w.starts_with(&prefix) && w.contains(needle))
}

/// Clear all recorded warnings (call before rendering a new document).
pub fn clear_warnings() {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_is_recorded_per_component() {
        warn_once("test-warning", "unknown keyword 'sideways'");
        assert!(has_warned("test-warning", "sideways"));
        assert!(!has_warned("test-other", "sideways"));
    }
}
