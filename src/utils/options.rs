//! Asset option bags and their validation.
//!
//! Options are passed through the registry to a mapper unchanged. Each mapper
//! declares which keys it understands and rejects everything else, so new
//! backends can grow an option schema without changing the lookup surface.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AssetError, Result};

/// Options for a single asset lookup, ordered by key.
///
/// The ordering makes the serialized form canonical, which the registry
/// relies on when building cache keys.
pub type AssetOptions = BTreeMap<String, OptionValue>;

/// A single option value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Str(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Same encoding as a form post: true -> 1, false -> 0
            Self::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Validate option keys against the keys a mapper accepts.
///
/// Unsupported keys (present but neither optional nor required) are reported
/// in key order, missing keys in the order `required` lists them. Both sets
/// are reported together when both apply.
pub fn check_options(options: &AssetOptions, optional: &[&str], required: &[&str]) -> Result<()> {
    let unsupported: Vec<String> = options
        .keys()
        .filter(|key| !optional.contains(&key.as_str()) && !required.contains(&key.as_str()))
        .cloned()
        .collect();

    let missing: Vec<String> = required
        .iter()
        .filter(|key| !options.contains_key(**key))
        .map(|key| (*key).to_owned())
        .collect();

    if unsupported.is_empty() && missing.is_empty() {
        return Ok(());
    }
    Err(AssetError::InvalidOptions {
        unsupported,
        missing,
    })
}

/// Serialize options as a form-urlencoded query string.
///
/// Returns an empty string for an empty option set.
pub fn to_query_string(options: &AssetOptions) -> String {
    if options.is_empty() {
        return String::new();
    }
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in options {
        serializer.append_pair(key, &value.to_string());
    }
    serializer.finish()
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pairs: &[(&str, OptionValue)]) -> AssetOptions {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn test_check_options_empty_is_ok() {
        assert!(check_options(&AssetOptions::new(), &[], &[]).is_ok());
    }

    #[test]
    fn test_check_options_accepts_declared_keys() {
        let opts = options(&[("width", "100".into()), ("format", "webp".into())]);
        assert!(check_options(&opts, &["width"], &["format"]).is_ok());
    }

    #[test]
    fn test_check_options_unsupported() {
        let opts = options(&[("width", "100".into()), ("crop", true.into())]);
        let err = check_options(&opts, &[], &[]).unwrap_err();
        match err {
            AssetError::InvalidOptions {
                unsupported,
                missing,
            } => {
                // BTreeMap order
                assert_eq!(unsupported, vec!["crop", "width"]);
                assert!(missing.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_options_reports_both_sets() {
        let opts = options(&[("crop", true.into())]);
        let err = check_options(&opts, &["width"], &["format", "quality"]).unwrap_err();
        match err {
            AssetError::InvalidOptions {
                unsupported,
                missing,
            } => {
                assert_eq!(unsupported, vec!["crop"]);
                assert_eq!(missing, vec!["format", "quality"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_query_string_is_canonical() {
        let a = options(&[("b", "2".into()), ("a", "x y".into())]);
        let b = options(&[("a", "x y".into()), ("b", "2".into())]);
        assert_eq!(to_query_string(&a), "a=x+y&b=2");
        assert_eq!(to_query_string(&a), to_query_string(&b));
    }

    #[test]
    fn test_query_string_bools() {
        let opts = options(&[("lazy", true.into()), ("retina", false.into())]);
        assert_eq!(to_query_string(&opts), "lazy=1&retina=0");
        assert_eq!(to_query_string(&AssetOptions::new()), "");
    }
}
