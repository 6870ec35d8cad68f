//! Header mappings and the override merge used by the cascade.

use std::collections::HashMap;

/// Header name to value mapping.
///
/// Names are compared as opaque, case-sensitive strings: `Accept` and
/// `accept` are two different entries.
pub type Headers = HashMap<String, String>;

/// Merges `overlay` into `base`; every key of `overlay` is inserted or replaces
/// the existing value.
pub fn merge_headers(base: &mut Headers, overlay: Headers) {
    base.extend(overlay);
}
