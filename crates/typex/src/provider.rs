//! The boundary to whatever loads source packages.

use typex_core::universe::Universe;

use crate::error::ProviderError;

/// Resolves search patterns into loaded packages and their type definitions.
///
/// Implementations must be deterministic: the same patterns yield the same
/// [`Universe`]. Source-level problems that do not prevent loading should be
/// reported as package diagnostics rather than as an error.
///
/// Any closure of the right shape is a provider:
///
/// ```
/// # use typex::{TypeProvider, error::ProviderError};
/// # use typex_core::universe::{Package, Universe};
/// let provider = |patterns: &[String]| -> Result<Universe, ProviderError> {
///     Ok(patterns.iter().fold(Universe::new(), |universe, path| {
///         universe.with_package(Package::new(path.as_str()))
///     }))
/// };
/// let universe = provider.load(&["example.com/p1".to_string()]).unwrap();
/// assert_eq!(universe.packages().len(), 1);
/// ```
pub trait TypeProvider {
    fn load(&self, patterns: &[String]) -> Result<Universe, ProviderError>;
}

impl<F> TypeProvider for F
where
    F: Fn(&[String]) -> Result<Universe, ProviderError>,
{
    fn load(&self, patterns: &[String]) -> Result<Universe, ProviderError> {
        self(patterns)
    }
}
