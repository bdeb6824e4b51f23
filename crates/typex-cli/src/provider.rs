//! A [`TypeProvider`] backed by JSON package descriptions.
//!
//! Every `.json` file holds one serialized [`Universe`]. A search pattern
//! names a file, a directory (its own `.json` files), or a directory
//! followed by `/...` (every `.json` file below it). Files whose stem ends
//! in `_test` describe test packages and are skipped unless tests are
//! requested. Matching files are loaded in path order and merged.

use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info, trace};
use thiserror::Error;
use walkdir::WalkDir;

use typex::{TypeProvider, error::ProviderError, universe::Universe};

const RECURSIVE_SUFFIX: &str = "/...";
const EXTENSION: &str = "json";
const TEST_SUFFIX: &str = "_test";

/// Failures while resolving patterns to package files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot find package {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads packages from JSON files on disk.
#[derive(Debug, Clone, Default)]
pub struct JsonProvider {
    tests: bool,
}

impl JsonProvider {
    /// Creates a provider; `tests` enables `*_test.json` files.
    pub fn new(tests: bool) -> Self {
        Self { tests }
    }

    /// Resolves `patterns` to the sorted set of files to load.
    fn resolve(&self, patterns: &[String]) -> Result<BTreeSet<PathBuf>, LoadError> {
        let mut files = BTreeSet::new();
        for pattern in patterns {
            if let Some(root) = pattern.strip_suffix(RECURSIVE_SUFFIX) {
                let root = if root.is_empty() { "." } else { root };
                self.scan(Path::new(root), None, pattern, &mut files)?;
                continue;
            }

            let path = Path::new(pattern);
            if path.is_file() {
                files.insert(path.to_path_buf());
            } else {
                self.scan(path, Some(1), pattern, &mut files)?;
            }
        }
        Ok(files)
    }

    fn scan(
        &self,
        root: &Path,
        max_depth: Option<usize>,
        pattern: &str,
        files: &mut BTreeSet<PathBuf>,
    ) -> Result<(), LoadError> {
        if !root.is_dir() {
            return Err(LoadError::NotFound(pattern.to_string()));
        }

        let mut walker = WalkDir::new(root).follow_links(true);
        if let Some(depth) = max_depth {
            walker = walker.max_depth(depth);
        }
        for entry in walker {
            let entry = entry.map_err(|err| LoadError::Read {
                path: root.to_path_buf(),
                source: err.into(),
            })?;
            let path = entry.path();
            if path.is_file() && self.accepts(path) {
                trace!(path = path.display().to_string(); "Matched package file");
                files.insert(path.to_path_buf());
            }
        }
        Ok(())
    }

    fn accepts(&self, path: &Path) -> bool {
        if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
            return false;
        }
        let is_test = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(TEST_SUFFIX));
        self.tests || !is_test
    }

    fn read(path: &Path) -> Result<Universe, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl TypeProvider for JsonProvider {
    fn load(&self, patterns: &[String]) -> Result<Universe, ProviderError> {
        let files = self.resolve(patterns)?;
        info!(files_count = files.len(), tests = self.tests; "Loading package files");

        let mut universe = Universe::new();
        for path in &files {
            debug!(path = path.display().to_string(); "Reading package file");
            universe.merge(Self::read(path)?);
        }
        Ok(universe)
    }
}
