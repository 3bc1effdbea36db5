//! Sanitizer warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used while composing property registries and sanitizers, where a problem is
//! worth telling the operator about but must not abort startup.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record a warning, returning `true` if it has not been seen before.
fn record(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about a configuration problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("registry", "property 'image-rendering' is already registered");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if record(format!("[{component}] {message}")) {
        eprintln!("{}", format!("[Tessera {component}] ⚠ {message}").yellow());
    }
}

/// Print a trace line for a sanitization event.
///
/// Unlike [`warn_once`] this is not deduplicated: every dropped node of every
/// run is reported. Intended for the `sanitize-trace` feature.
pub fn trace(component: &str, message: &str) {
    eprintln!("{}", format!("[Tessera {component}] {message}").dimmed());
}

/// Returns true if a warning with this component and message was already printed.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&format!("[{component}] {message}")))
}
