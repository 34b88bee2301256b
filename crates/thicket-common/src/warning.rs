//! Warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the selector compiler and the CLI to report input that is accepted
//! but probably not what the caller meant.

use std::collections::HashSet;
use std::sync::Mutex;

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about questionable input (prints once per unique message).
///
/// Returns whether the warning was printed, i.e. `false` when the same
/// component/message pair was already reported.
///
/// # Example
/// ```ignore
/// warn_once("Select", "custom function ':not' shadows the built-in");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
#[must_use]
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[Thicket {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings so they can be printed again.
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
