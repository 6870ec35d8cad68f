//! Variables module for restree
//!
//! This module holds the variable set threaded through a resolution, the
//! `{{name}}` expander, and the sources that seed or grow the set.

pub mod environment;
pub mod substitution;

use std::collections::HashMap;

pub use environment::process_env;
pub use substitution::{expand, placeholder_names, ExpansionError};

/// Placeholder name to value mapping.
pub type Variables = HashMap<String, String>;

/// Merges `update` into `variables`; values in `update` replace existing ones.
pub fn merge_variables(variables: &mut Variables, update: Variables) {
    variables.extend(update);
}
