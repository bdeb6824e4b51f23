//! Command-line argument definitions for the typex CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Pattern lists extend the configuration file, scalar flags
//! override it.

use clap::{Parser, ValueEnum};

use typex::render::Dialect;

/// Output language selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    /// Native declarations in a directory tree
    Go,
    /// TypeScript type aliases in nested modules
    TsType,
    /// TypeScript classes in nested modules
    TsClass,
}

impl From<Language> for Dialect {
    fn from(language: Language) -> Self {
        match language {
            Language::Go => Dialect::Go,
            Language::TsType => Dialect::TsType,
            Language::TsClass => Dialect::TsClass,
        }
    }
}

/// Print the structural types of packages as a Go or TypeScript tree
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Package patterns: a .json file, a directory, or `dir/...`
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Include types whose qualified name matches this pattern
    #[arg(short = 'f', long = "filter")]
    pub include: Vec<String>,

    /// Exclude types whose qualified name matches this pattern
    #[arg(short = 'x', long)]
    pub exclude: Vec<String>,

    /// Relocate qualified names with an `old:new` rule
    #[arg(short, long)]
    pub replace: Vec<String>,

    /// Output language
    #[arg(short, long, value_enum)]
    pub language: Option<Language>,

    /// Include unexported types, fields and methods
    #[arg(short, long)]
    pub unexported: bool,

    /// Also load test packages
    #[arg(short, long)]
    pub tests: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write the output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
