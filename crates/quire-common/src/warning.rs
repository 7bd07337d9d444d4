//! Layout warnings routed through the `log` facade.
//!
//! Provides deduplication to avoid spamming the same warning on every render
//! pass. Used by the layout core and the output backends to report soft
//! failures (unresolved bounds, missing fonts, unencodable glyphs).

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Emit a warning once per unique `(component, message)` pair.
///
/// The warning is logged at `warn` level with target `quire::<component>`,
/// so it can be filtered per component with `RUST_LOG`.
///
/// Returns `true` if the warning was emitted, `false` if it was a duplicate.
///
/// # Example
/// ```
/// use quire_common::warning::warn_once;
///
/// warn_once("layout", "bounds of box #3 cannot be fixed");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        let target = format!("quire::{component}");
        log::warn!(target: target.as_str(), "{message}");
    }
    should_log
}

/// Clear all recorded warnings (call when starting a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
