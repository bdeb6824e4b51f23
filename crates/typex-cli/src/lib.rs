//! CLI logic for the typex tool.
//!
//! [`run`] merges the command line into the loaded configuration, loads the
//! requested packages through the [`JsonProvider`] and prints the exported
//! tree to stdout or to the output file.

pub mod error_adapter;

mod args;
mod config;
mod provider;

pub use args::{Args, Language};
pub use provider::{JsonProvider, LoadError};

use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use log::{debug, info};

use typex::{TypeExporter, TypexError, config::AppConfig};

/// Applies command-line flags on top of `config`.
///
/// Pattern lists are appended; the language and the unexported switch
/// override the file settings when given.
fn merge_args(mut config: AppConfig, args: &Args) -> AppConfig {
    let filter = config.filter_mut();
    filter.extend_include(args.include.iter().cloned());
    filter.extend_exclude(args.exclude.iter().cloned());
    filter.extend_replace(args.replace.iter().cloned());

    let output = config.output_mut();
    if let Some(language) = args.language {
        output.set_dialect(language.into());
    }
    if args.unexported {
        output.set_include_unexported(true);
    }
    config
}

/// Run the typex CLI application
///
/// # Errors
///
/// Returns `TypexError` for:
/// - Configuration loading errors
/// - Package loading errors
/// - Diagnostics reported for a loaded package
/// - Named types without a definition
/// - Output I/O errors
pub fn run(args: &Args) -> Result<(), TypexError> {
    info!(
        patterns:? = args.patterns,
        output_path:? = args.output;
        "Exporting types"
    );

    let config = merge_args(config::load_config(args.config.as_ref())?, args);
    debug!(config:?; "Effective configuration");

    let provider = JsonProvider::new(args.tests);
    let exporter = TypeExporter::new(config);

    // Render fully before touching the output file.
    let graph = exporter.inspect(&provider, &args.patterns)?;
    let paths = exporter.render(&graph);

    match &args.output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            exporter.print(&paths, writer)?;
            info!(output_file = path; "Types exported successfully");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            exporter.print(&paths, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}
