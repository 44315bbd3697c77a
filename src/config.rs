//! Project directory layout.
//!
//! Every path the binary touches is derived from a single project root:
//!
//! ```text
//! <root>/
//! ├── cache/
//! ├── config/
//! ├── data/      va_scc.csv, va_scc.json.gz
//! └── logs/      va_scc.log
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::BatchError;

pub const INPUT_FILE_NAME: &str = "va_scc.csv";
pub const OUTPUT_FILE_NAME: &str = "va_scc.json.gz";
pub const LOG_FILE_NAME: &str = "va_scc.log";

/// Directories used by a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub root: PathBuf,
    pub cache_dir: PathBuf,
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Paths {
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            cache_dir: root.join("cache"),
            config_dir: root.join("config"),
            data_dir: root.join("data"),
            log_dir: root.join("logs"),
            root,
        }
    }

    pub fn dirs(&self) -> [&Path; 4] {
        [
            self.cache_dir.as_path(),
            self.config_dir.as_path(),
            self.data_dir.as_path(),
            self.log_dir.as_path(),
        ]
    }

    /// Creates every missing directory of the layout, root included.
    pub fn ensure_dirs(&self) -> Result<(), BatchError> {
        for dir in self.dirs() {
            if !dir.is_dir() {
                debug!("Creating directory {}", dir.display());
            }
            fs::create_dir_all(dir).map_err(|error| {
                BatchError::Configuration(format!(
                    "cannot create directory {}: {}",
                    dir.display(),
                    error
                ))
            })?;
        }
        Ok(())
    }

    pub fn default_input(&self) -> PathBuf {
        self.data_dir.join(INPUT_FILE_NAME)
    }

    pub fn default_output(&self) -> PathBuf {
        self.data_dir.join(OUTPUT_FILE_NAME)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::Paths;
    use crate::error::BatchError;

    #[test]
    fn layout_is_derived_from_the_root() {
        let paths = Paths::from_root("/srv/scc");

        assert_eq!(paths.data_dir.to_str(), Some("/srv/scc/data"));
        assert_eq!(
            paths.default_input().to_str(),
            Some("/srv/scc/data/va_scc.csv")
        );
        assert_eq!(
            paths.default_output().to_str(),
            Some("/srv/scc/data/va_scc.json.gz")
        );
        assert_eq!(paths.log_file().to_str(), Some("/srv/scc/logs/va_scc.log"));
    }

    #[test]
    fn ensure_dirs_creates_missing_directories_and_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = Paths::from_root(tmp.path().join("project"));

        paths.ensure_dirs().unwrap();
        paths.ensure_dirs().unwrap();

        for dir in paths.dirs() {
            assert!(dir.is_dir(), "{} was not created", dir.display());
        }
    }

    #[test]
    fn ensure_dirs_reports_a_blocked_path() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("project");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("data"), "not a directory").unwrap();

        let result = Paths::from_root(&root).ensure_dirs();

        assert!(matches!(result, Err(BatchError::Configuration(_))));
    }
}
