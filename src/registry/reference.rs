//! Scope-qualified asset references (`scope:reference`).

use std::fmt;

/// Scope id used when a reference carries no `scope:` prefix.
pub const DEFAULT_SCOPE: &str = "";

/// Separator between scope and reference in the string form.
const SCOPE_SEPARATOR: char = ':';

/// A reference together with the scope of the mapper that resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedRef {
    pub scope: String,
    pub reference: String,
}

impl QualifiedRef {
    pub fn new(scope: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            reference: reference.into(),
        }
    }

    /// Split on the first `:`. Without a separator the whole string is the
    /// reference and the scope is [`DEFAULT_SCOPE`].
    ///
    /// # Examples
    /// ```text
    /// "cdn:images/logo"  -> ("cdn", "images/logo")
    /// "logo"             -> ("", "logo")
    /// "a:b:c"            -> ("a", "b:c")
    /// ```
    pub fn parse(qualified: &str) -> Self {
        match qualified.split_once(SCOPE_SEPARATOR) {
            Some((scope, reference)) => Self::new(scope, reference),
            None => Self::new(DEFAULT_SCOPE, qualified),
        }
    }
}

impl fmt::Display for QualifiedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.scope, SCOPE_SEPARATOR, self.reference)
    }
}

impl From<&str> for QualifiedRef {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<&String> for QualifiedRef {
    fn from(value: &String) -> Self {
        Self::parse(value)
    }
}

impl From<String> for QualifiedRef {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

/// A `(scope, reference)` pair is taken verbatim, without parsing.
impl From<(&str, &str)> for QualifiedRef {
    fn from((scope, reference): (&str, &str)) -> Self {
        Self::new(scope, reference)
    }
}
