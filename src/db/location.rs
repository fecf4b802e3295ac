use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-catalog";
/// Catalog file name stored inside the application data directory.
const DATA_FILE_NAME: &str = "books.csv";

/// Where the catalog lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    data_file: PathBuf,
}

impl CatalogConfig {
    /// Default location: `~/.book-catalog/books.csv`.
    pub fn from_home() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::in_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Use the standard file name inside an arbitrary directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::with_data_file(dir.as_ref().join(DATA_FILE_NAME))
    }

    pub fn with_data_file(path: impl Into<PathBuf>) -> Self {
        Self {
            data_file: path.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Create the directory holding the catalog file. Only bootstrap code calls
    /// this; the store itself reports a missing directory as an error.
    pub fn ensure_data_dir(&self) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
        Ok(())
    }
}
