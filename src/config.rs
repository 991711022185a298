//! Dataset location configuration.
//!
//! The dataset files are looked up in a data directory resolved in this
//! order:
//!
//! 1. an explicit directory (the `--data-dir` flag)
//! 2. the `MARC_DATA_DIR` environment variable
//! 3. the current directory

use crate::dataset::DatasetKind;
use std::path::{Path, PathBuf};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "MARC_DATA_DIR";

/// Where to find the brief and verbose dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Directory containing the dataset files.
    pub data_dir: PathBuf,
    /// File name of the brief dataset.
    pub brief_file: String,
    /// File name of the verbose dataset.
    pub verbose_file: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            data_dir: PathBuf::from("."),
            brief_file: DatasetKind::Brief.default_file_name().to_string(),
            verbose_file: DatasetKind::Verbose.default_file_name().to_string(),
        }
    }
}

impl LookupConfig {
    /// Configuration rooted at `data_dir` with default file names.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        LookupConfig {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Resolve the data directory from an optional explicit value and the
    /// process environment.
    #[must_use]
    pub fn resolve(explicit: Option<&Path>) -> Self {
        Self::resolve_with(explicit, std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    /// Resolve the data directory from the environment only.
    #[must_use]
    pub fn from_env() -> Self {
        Self::resolve(None)
    }

    /// Resolution with the environment value passed in.
    #[must_use]
    pub fn resolve_with(explicit: Option<&Path>, env_dir: Option<PathBuf>) -> Self {
        let data_dir = explicit
            .map(Path::to_path_buf)
            .or_else(|| env_dir.filter(|dir| !dir.as_os_str().is_empty()))
            .unwrap_or_else(|| PathBuf::from("."));
        tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");
        Self::new(data_dir)
    }

    /// Path of the dataset file of the given kind.
    #[must_use]
    pub fn dataset_path(&self, kind: DatasetKind) -> PathBuf {
        match kind {
            DatasetKind::Brief => self.data_dir.join(&self.brief_file),
            DatasetKind::Verbose => self.data_dir.join(&self.verbose_file),
        }
    }
}
