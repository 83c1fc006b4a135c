// src/models/mod.rs

//! Domain models for the watcher application.

mod config;
mod post;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

// Re-export all public types
pub use config::{
    AnnounceConfig, BackupConfig, Config, HeaderRule, SelectorConfig, SourceConfig, StorageConfig,
    WatcherConfig,
};
pub use post::Post;

/// Baseline mapping: source URL → links seen on that board as of the last run.
///
/// Replaced wholesale per source on every run, never merged.
pub type Baseline = BTreeMap<String, Vec<String>>;

/// Summary of a watch run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Number of configured sources
    pub sources_total: usize,
    /// Sources whose fetch or parse failed (treated as zero posts)
    pub sources_failed: usize,
    /// Posts extracted across all sources
    pub posts_seen: usize,
    /// New posts announced
    pub announced: usize,
    /// Announcements that failed to deliver
    pub delivery_failures: usize,
}
