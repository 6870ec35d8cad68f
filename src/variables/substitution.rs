//! Placeholder expansion.
//!
//! Replaces every `{{name}}` token with the matching entry of a variable set.
//! Expansion is a single pass: substituted values are never scanned again, so
//! a value that itself contains `{{...}}` is inserted literally.

use super::Variables;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// Cached regex matching `{{identifier}}` where the identifier is one or more word characters.
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Failed to compile placeholder regex"));

/// One or more placeholders had no value in the variable set.
///
/// `output` is the text with every resolvable placeholder substituted and the
/// missing ones left verbatim, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing variables: {}", .missing.join(", "))]
pub struct ExpansionError {
    /// Distinct missing names, in order of first appearance.
    pub missing: Vec<String>,
    /// The partially expanded text.
    pub output: String,
}

/// Substitutes all `{{name}}` placeholders in `text`.
///
/// The whole input is scanned before failing, so the error lists every
/// missing name exactly once even when a name is referenced several times.
///
/// # Examples
///
/// ```
/// use restree::variables::{expand, Variables};
///
/// let mut variables = Variables::new();
/// variables.insert("test".to_string(), "world".to_string());
///
/// assert_eq!(expand("hello {{test}}", &variables).unwrap(), "hello world");
///
/// let err = expand("{{a}} {{test}} {{a}}", &variables).unwrap_err();
/// assert_eq!(err.missing, vec!["a".to_string()]);
/// assert_eq!(err.output, "{{a}} world {{a}}");
/// ```
pub fn expand(text: &str, variables: &Variables) -> Result<String, ExpansionError> {
    // Fast path: no placeholder markers at all
    if !text.contains("{{") {
        return Ok(text.to_string());
    }

    let mut missing: Vec<String> = Vec::new();
    let output = PLACEHOLDER_REGEX
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            match variables.get(name) {
                Some(value) => value.clone(),
                None => {
                    if !missing.iter().any(|m| m == name) {
                        missing.push(name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        })
        .into_owned();

    if missing.is_empty() {
        Ok(output)
    } else {
        Err(ExpansionError { missing, output })
    }
}

/// Returns the distinct placeholder names referenced in `text`, in order of first appearance.
pub fn placeholder_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
