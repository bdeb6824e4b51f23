//! Qualified type names and identifier visibility.
//!
//! A [`QualifiedName`] is the globally unique key of a named type: the
//! import path of the declaring package plus the local identifier. Names
//! declared in the universe scope (such as `error`) have an empty package.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Errors produced while parsing a [`QualifiedName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("qualified name `{0}` has an empty identifier")]
    EmptyIdentifier(String),
}

/// A package path plus a local identifier.
///
/// Ordering and equality are structural, so a name can serve as the
/// identity of a type wherever the type itself is not shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct QualifiedName {
    package: String,
    name: String,
}

impl QualifiedName {
    /// Creates a name from its package path and identifier.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Returns the import path of the declaring package (may be empty).
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the local identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the local identifier is exported.
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

impl FromStr for QualifiedName {
    type Err = NameError;

    /// Splits at the last `.`; identifiers never contain one, package paths may.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = Self::from(s);
        if name.name.is_empty() {
            return Err(NameError::EmptyIdentifier(s.to_string()));
        }
        Ok(name)
    }
}

/// Splits without validation; an empty identifier is kept as is.
impl From<&str> for QualifiedName {
    fn from(qualified: &str) -> Self {
        let (package, name) = qualified.rsplit_once('.').unwrap_or(("", qualified));
        Self::new(package, name)
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Reports whether an identifier is exported, i.e. starts with an uppercase letter.
pub fn is_exported(ident: &str) -> bool {
    ident.chars().next().is_some_and(char::is_uppercase)
}

/// Reports whether the last segment of a path-like string is exported.
///
/// Both `/` and `.` act as separators, so `"net/url.URL"`, `"url.URL"` and
/// `"URL"` all inspect `URL`.
pub fn is_exported_path(path: &str) -> bool {
    let last = path.rsplit(['/', '.']).next().unwrap_or(path);
    is_exported(last)
}
