//! Loaded packages and their named type definitions.
//!
//! A [`Universe`] is the complete answer of a type provider: the packages
//! that matched the search patterns, and a definition table resolving every
//! named type those packages reference to its underlying type.

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::{name::QualifiedName, types::Type};

/// A loaded package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Package {
    path: String,
    /// Top-level declarations by local identifier, in declaration order.
    #[serde(default)]
    declarations: IndexMap<String, Type>,
    /// Messages reported while loading the package source.
    #[serde(default)]
    diagnostics: Vec<String>,
}

impl Package {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Adds a top-level declaration (builder style).
    pub fn with_declaration(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.declarations.insert(name.into(), ty);
        self
    }

    /// Adds a load diagnostic (builder style).
    pub fn with_diagnostic(mut self, message: impl Into<String>) -> Self {
        self.diagnostics.push(message.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn declarations(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.declarations.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Qualifies a local identifier with this package's path.
    pub fn qualify(&self, name: &str) -> QualifiedName {
        QualifiedName::new(self.path.clone(), name)
    }
}

/// Packages plus the named type definitions they depend on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Universe {
    #[serde(default)]
    packages: Vec<Package>,
    /// Underlying type of every named type, keyed by qualified name.
    #[serde(default)]
    types: IndexMap<QualifiedName, Type>,
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a package (builder style).
    pub fn with_package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    /// Defines a named type (builder style).
    ///
    /// A later definition of the same name replaces the earlier one.
    pub fn with_type(mut self, name: &str, underlying: Type) -> Self {
        self.types.insert(QualifiedName::from(name), underlying);
        self
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Returns the underlying type of a named type.
    pub fn underlying(&self, name: &QualifiedName) -> Option<&Type> {
        self.types.get(name)
    }

    /// Returns `true` if no package was loaded.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Merges another universe into this one.
    ///
    /// Packages are appended in order. Definitions already present are kept,
    /// since every provider describes a given named type identically.
    pub fn merge(&mut self, other: Universe) {
        self.packages.extend(other.packages);
        for (name, underlying) in other.types {
            if self.types.contains_key(&name) {
                debug!(name:%; "Skipping duplicate type definition");
                continue;
            }
            self.types.insert(name, underlying);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BasicKind, Struct};

    #[test]
    fn test_builder() {
        let universe = Universe::new()
            .with_package(
                Package::new("example.com/p1")
                    .with_declaration("T", Type::named("example.com/p1.T")),
            )
            .with_type("example.com/p1.T", Struct::default().into());

        assert_eq!(universe.packages().len(), 1);
        let package = &universe.packages()[0];
        assert_eq!(package.path(), "example.com/p1");
        assert_eq!(package.qualify("T").to_string(), "example.com/p1.T");

        let name = package.qualify("T");
        assert_eq!(universe.underlying(&name), Some(&Struct::default().into()));
    }

    #[test]
    fn test_merge_keeps_first_definition() {
        let mut first = Universe::new()
            .with_package(Package::new("a"))
            .with_type("time.Duration", BasicKind::Int64.into());
        let second = Universe::new()
            .with_package(Package::new("b"))
            .with_type("time.Duration", BasicKind::Int.into())
            .with_type("b.T", BasicKind::Bool.into());

        first.merge(second);

        let paths: Vec<_> = first.packages().iter().map(Package::path).collect();
        assert_eq!(paths, ["a", "b"]);
        assert_eq!(
            first.underlying(&"time.Duration".parse().unwrap()),
            Some(&Type::Basic(BasicKind::Int64))
        );
        assert!(first.underlying(&"b.T".parse().unwrap()).is_some());
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "packages": [{
                "path": "example.com/p2",
                "declarations": {"I": {"named": "example.com/p2.I"}},
                "diagnostics": ["p2.go:3:1: expected declaration"]
            }],
            "types": {"example.com/p2.I": {"basic": "int"}}
        }"#;
        let universe: Universe = serde_json::from_str(json).unwrap();

        let package = &universe.packages()[0];
        assert_eq!(package.diagnostics(), ["p2.go:3:1: expected declaration"]);
        let declared: Vec<_> = package.declarations().map(|(name, _)| name).collect();
        assert_eq!(declared, ["I"]);
        assert_eq!(
            universe.underlying(&package.qualify("I")),
            Some(&Type::Basic(BasicKind::Int))
        );
    }
}
