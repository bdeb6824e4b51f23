//! Error types for typex operations.
//!
//! This module provides the main error type [`TypexError`]. Every variant is
//! fatal: a failing run produces no partial graph and no partial output.
//! Degraded filter or relocation patterns are not errors and never show up
//! here.

use std::io;

use thiserror::Error;

use typex_core::name::QualifiedName;

/// Error reported by a [`TypeProvider`](crate::TypeProvider).
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for typex operations.
#[derive(Debug, Error)]
pub enum TypexError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The provider could not resolve the search patterns.
    #[error("Provider error: {0}")]
    Provider(#[source] ProviderError),

    /// The provider surfaced a diagnostic from the underlying source.
    #[error("{0}")]
    Compile(String),

    /// A named type is referenced but has no definition.
    #[error("Unresolved type: {0}")]
    UnresolvedType(QualifiedName),
}
