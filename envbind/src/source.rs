//! Environment value lookup with default fallback.

use std::env;

/// Resolve the raw string for a lookup key.
///
/// The environment wins when it holds a non-empty value. Otherwise the tag's
/// static default applies, but only while the target still holds its zero
/// value: a value the caller pre-populated on the struct beats the tag
/// default. An empty result is not an error here; required-ness is the
/// caller's check.
pub(crate) fn lookup(key: &str, current_is_unset: bool, fallback_default: &str) -> String {
    if let Ok(value) = env::var(key) {
        if !value.is_empty() {
            return value;
        }
    }
    if current_is_unset {
        fallback_default.to_string()
    } else {
        String::new()
    }
}
