//! Initial variable sources.

use super::Variables;
use std::env;

/// Snapshots the process environment into a fresh variable set.
///
/// Entries whose name or value is not valid UTF-8 are skipped. The snapshot is
/// independent of the process: later changes to either side are not shared.
pub fn process_env() -> Variables {
    env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
