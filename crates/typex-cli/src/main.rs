//! The `typex` binary.

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug, error, warn};
use miette::GraphicalReportHandler;

use typex_cli::{Args, error_adapter::to_reportable};

/// Parses `--log-level`, keeping the default level for unknown names.
fn log_level(name: &str) -> (LevelFilter, bool) {
    match name.parse() {
        Ok(level) => (level, true),
        Err(_) => (LevelFilter::Warn, false),
    }
}

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    let (level, known) = log_level(&args.log_level);
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
    if !known {
        warn!(log_level = args.log_level; "Unknown log level, using warn");
    }
    debug!(args:?; "Parsed arguments");

    let Err(err) = typex_cli::run(&args) else {
        return ExitCode::SUCCESS;
    };

    let mut report = String::new();
    match GraphicalReportHandler::new().render_report(&mut report, &to_reportable(&err)) {
        Ok(()) => error!("{report}"),
        Err(_) => error!("{err}"),
    }
    ExitCode::FAILURE
}
