//! Typex - structural type declarations as Go or TypeScript trees.
//!
//! Collection, relocation, rendering and layout of the named types a
//! [`TypeProvider`] loads. The pipeline runs in four stages:
//!
//! 1. [`Collector`] walks the types reachable from the filtered top-level
//!    declarations into a [`TypeGraph`]
//! 2. [`filter::PathReplace`] relocates every qualified name to a display path
//! 3. [`render::Renderer`] prints each named type in the configured dialect
//! 4. [`layout::TreeWalk`] arranges the entries by display path and prints
//!    them through a [`layout::Layout`]

pub mod config;
pub mod error;
pub mod filter;
pub mod layout;
pub mod render;

mod collect;
mod graph;
mod provider;

pub use typex_core::{name, tag, types, universe};

pub use collect::Collector;
pub use error::TypexError;
pub use graph::TypeGraph;
pub use provider::TypeProvider;

use std::io::Write;

use log::{debug, info, trace};

use config::{AppConfig, LayoutKind};
use filter::{IncludeExcludeFilter, PathReplace};
use layout::{ModuleLayout, TreeLayout, TreeWalk};
use render::{PathMap, Renderer};

/// Facade running the typex pipeline with one configuration.
///
/// # Examples
///
/// ```rust
/// use typex::{TypeExporter, config::AppConfig, error::ProviderError};
/// use typex::types::{BasicKind, Field, Struct, Type};
/// use typex::universe::{Package, Universe};
///
/// let provider = |_: &[String]| -> Result<Universe, ProviderError> {
///     Ok(Universe::new()
///         .with_package(
///             Package::new("example.com/p1")
///                 .with_declaration("T", Type::named("example.com/p1.T")),
///         )
///         .with_type(
///             "example.com/p1.T",
///             Struct::new(vec![Field::new("A", BasicKind::Int.into())]).into(),
///         ))
/// };
///
/// let exporter = TypeExporter::new(AppConfig::default());
/// let mut out = Vec::new();
/// exporter
///     .export(&provider, &["example.com/p1".to_string()], &mut out)
///     .expect("Failed to export");
///
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     concat!(
///         "└── example.com\n",
///         "    └── p1\n",
///         "        └── T struct {\n",
///         "                A int\n",
///         "            }\n",
///     )
/// );
/// ```
#[derive(Debug, Default)]
pub struct TypeExporter {
    config: AppConfig,
}

impl TypeExporter {
    /// Create a new exporter with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load `patterns` through `provider` and collect the selected types.
    ///
    /// # Errors
    ///
    /// Returns `TypexError` if the provider fails, reports a diagnostic, or
    /// leaves a reachable named type undefined.
    pub fn inspect<P>(&self, provider: &P, patterns: &[String]) -> Result<TypeGraph, TypexError>
    where
        P: TypeProvider + ?Sized,
    {
        let filter = self.config.filter();
        let root_filter = IncludeExcludeFilter::new(filter.include(), filter.exclude());
        let collector = Collector::new(root_filter, self.config.output().include_unexported());

        let graph = collector.inspect(provider, patterns)?;
        trace!(graph:?; "Collected type graph");
        Ok(graph)
    }

    /// Render every entry of `graph` in the configured dialect.
    pub fn render(&self, graph: &TypeGraph) -> PathMap {
        let replace = PathReplace::new(self.config.filter().replace());
        let output = self.config.output();
        Renderer::new(output.dialect(), &replace, output.include_unexported()).render(graph)
    }

    /// Print rendered entries with the configured layout.
    ///
    /// # Errors
    ///
    /// Returns `TypexError::Io` if writing fails.
    pub fn print<W: Write>(&self, paths: &PathMap, writer: W) -> Result<(), TypexError> {
        let layout = self.config.output().layout();
        info!(layout:?, entries_count = paths.len(); "Printing entries");
        match layout {
            LayoutKind::Tree => {
                let mut layout = TreeLayout::new(writer);
                TreeWalk::walk(paths, &mut layout)?;
                layout.into_inner().flush()?;
            }
            LayoutKind::Module => {
                let mut layout = ModuleLayout::new(writer);
                TreeWalk::walk(paths, &mut layout)?;
                layout.into_inner().flush()?;
            }
        }
        Ok(())
    }

    /// Run the whole pipeline and print the result to `writer`.
    ///
    /// Nothing is written unless collection succeeds.
    ///
    /// # Errors
    ///
    /// Returns `TypexError` for any failure of [`TypeExporter::inspect`] or
    /// [`TypeExporter::print`].
    pub fn export<P, W>(
        &self,
        provider: &P,
        patterns: &[String],
        writer: W,
    ) -> Result<(), TypexError>
    where
        P: TypeProvider + ?Sized,
        W: Write,
    {
        let graph = self.inspect(provider, patterns)?;
        let paths = self.render(&graph);
        debug!(entries_count = paths.len(); "Entries rendered");
        self.print(&paths, writer)?;
        info!("Export completed");
        Ok(())
    }
}
