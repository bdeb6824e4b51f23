//! TOML configuration discovery for the CLI.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use typex::{TypexError, config::AppConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for TypexError {
    fn from(err: ConfigError) -> Self {
        let kind = match err {
            ConfigError::MissingFile(_) => io::ErrorKind::NotFound,
            ConfigError::Parse(_) => io::ErrorKind::InvalidData,
        };
        TypexError::Io(io::Error::new(kind, err))
    }
}

/// Relative path of the per-project configuration file.
const LOCAL_CONFIG: &str = "typex/config.toml";

/// Configuration files searched when no explicit path is given, in order:
/// the per-project file, then the platform configuration directory.
fn candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    match ProjectDirs::from("com", "typex", "typex") {
        Some(dirs) => paths.push(dirs.config_dir().join("config.toml")),
        None => debug!("Could not determine platform-specific config directory"),
    }
    paths
}

/// Load the configuration for this run.
///
/// An explicit path must exist. Otherwise the first existing file among
/// [`candidates`] is used, and defaults apply when there is none.
///
/// # Errors
///
/// Returns error if the explicit file is missing, or if the selected file
/// cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TypexError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    for path in candidates() {
        if path.exists() {
            info!(path = path.display().to_string(); "Loading configuration");
            return load_config_file(&path);
        }
        debug!(path = path.display().to_string(); "Configuration file not found");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: &Path) -> Result<AppConfig, TypexError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()).into())
}
