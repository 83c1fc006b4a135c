// src/storage/mod.rs

//! Baseline persistence.
//!
//! The baseline is a flat JSON object mapping each source URL to the list
//! of post links seen on that board as of the last run:
//!
//! ```text
//! {
//!   "https://www.qui.help/forum/ask-psychologist": [
//!     "https://www.qui.help/forum/ask-psychologist/post-7"
//!   ]
//! }
//! ```
//!
//! Each run replaces the mapping wholesale; there is no merging with
//! previous content.

pub mod backup;

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::Baseline;

pub use backup::BackupSync;

/// Flat-file store for the baseline mapping.
#[derive(Debug, Clone)]
pub struct BaselineStore {
    path: PathBuf,
}

impl BaselineStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted baseline.
    ///
    /// A missing file is a first run and yields an empty mapping; a file
    /// that exists but cannot be parsed is an error.
    pub async fn load(&self) -> Result<Baseline> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Baseline::new()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Save the full baseline, overwriting the previous file (write to
    /// temp, then rename). Output is pretty-printed UTF-8 with non-ASCII
    /// text kept literal.
    pub async fn save(&self, baseline: &Baseline) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(baseline)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
