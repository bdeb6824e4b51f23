//! Configuration types for typex exports.
//!
//! This module provides configuration structures that control which types
//! are collected, where they are positioned, and how they are printed. All
//! types implement [`serde::Deserialize`] for flexible loading from external
//! sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining filter and output settings.
//! - [`FilterConfig`] - Include, exclude and relocation patterns.
//! - [`OutputConfig`] - Selects the [`Dialect`], the [`LayoutKind`] and visibility.
//!
//! # Example
//!
//! ```
//! # use typex::config::{AppConfig, LayoutKind};
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.output().layout(), LayoutKind::Tree);
//! ```

use serde::Deserialize;

use crate::render::Dialect;

/// Pattern that matches every qualified name.
pub const MATCH_ALL: &str = ".*";

/// Top-level configuration combining filter and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Filter configuration section.
    #[serde(default)]
    filter: FilterConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `filter` - Include, exclude and relocation patterns.
    /// * `output` - Dialect, layout and visibility settings.
    pub fn new(filter: FilterConfig, output: OutputConfig) -> Self {
        Self { filter, output }
    }

    /// Returns the filter configuration.
    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Returns the mutable filter configuration.
    pub fn filter_mut(&mut self) -> &mut FilterConfig {
        &mut self.filter
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the mutable output configuration.
    pub fn output_mut(&mut self) -> &mut OutputConfig {
        &mut self.output
    }
}

/// Pattern lists consumed by the path filter and path replacement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// Include patterns; an empty list includes everything.
    #[serde(default)]
    include: Vec<String>,

    /// Exclude patterns, checked only for included names.
    #[serde(default)]
    exclude: Vec<String>,

    /// Relocation rules in `pattern:replacement` form, applied in order.
    #[serde(default)]
    replace: Vec<String>,
}

impl FilterConfig {
    /// Creates a new [`FilterConfig`].
    pub fn new(include: Vec<String>, exclude: Vec<String>, replace: Vec<String>) -> Self {
        Self {
            include,
            exclude,
            replace,
        }
    }

    /// Returns the include patterns, defaulting to [`MATCH_ALL`] when none are set.
    pub fn include(&self) -> Vec<String> {
        if self.include.is_empty() {
            vec![MATCH_ALL.to_string()]
        } else {
            self.include.clone()
        }
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    pub fn replace(&self) -> &[String] {
        &self.replace
    }

    /// Appends more include patterns.
    pub fn extend_include(&mut self, patterns: impl IntoIterator<Item = String>) {
        self.include.extend(patterns);
    }

    /// Appends more exclude patterns.
    pub fn extend_exclude(&mut self, patterns: impl IntoIterator<Item = String>) {
        self.exclude.extend(patterns);
    }

    /// Appends more relocation rules.
    pub fn extend_replace(&mut self, rules: impl IntoIterator<Item = String>) {
        self.replace.extend(rules);
    }
}

/// Available hierarchy printers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Directory-style tree with connector glyphs.
    Tree,
    /// Nested `export module` blocks.
    Module,
}

/// Dialect, layout and visibility settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Output [`Dialect`].
    #[serde(default)]
    dialect: Dialect,

    /// Explicit [`LayoutKind`]; derived from the dialect when unset.
    #[serde(default)]
    layout: Option<LayoutKind>,

    /// Whether unexported types, fields and methods are included.
    #[serde(default)]
    unexported: bool,
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`] with the layout derived from the dialect.
    pub fn new(dialect: Dialect, unexported: bool) -> Self {
        Self {
            dialect,
            layout: None,
            unexported,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Returns the configured layout, or the natural layout of the dialect.
    pub fn layout(&self) -> LayoutKind {
        self.layout.unwrap_or(match self.dialect {
            Dialect::Go => LayoutKind::Tree,
            Dialect::TsType | Dialect::TsClass => LayoutKind::Module,
        })
    }

    pub fn include_unexported(&self) -> bool {
        self.unexported
    }

    pub fn set_dialect(&mut self, dialect: Dialect) {
        self.dialect = dialect;
    }

    pub fn set_layout(&mut self, layout: LayoutKind) {
        self.layout = Some(layout);
    }

    pub fn set_include_unexported(&mut self, unexported: bool) {
        self.unexported = unexported;
    }
}
