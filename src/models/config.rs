//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP fetch behavior settings
    #[serde(default)]
    pub watcher: WatcherConfig,

    /// CSS selectors for the board's post cards
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Boards to watch
    #[serde(default = "defaults::sources")]
    pub sources: Vec<SourceConfig>,

    /// Announcement header rules
    #[serde(default)]
    pub announce: AnnounceConfig,

    /// Baseline persistence settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Git backup settings
    #[serde(default)]
    pub backup: BackupConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.watcher.user_agent.trim().is_empty() {
            return Err(AppError::config("watcher.user_agent is empty"));
        }
        if self.watcher.timeout_secs == 0 {
            return Err(AppError::config("watcher.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.watcher.base_url)?;
        if self.sources.is_empty() {
            return Err(AppError::config("No sources defined"));
        }
        for source in &self.sources {
            url::Url::parse(&source.url)?;
        }
        self.selectors.validate()?;
        if self.storage.cache_file.trim().is_empty() {
            return Err(AppError::config("storage.cache_file is empty"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watcher: WatcherConfig::default(),
            selectors: SelectorConfig::default(),
            sources: defaults::sources(),
            announce: AnnounceConfig::default(),
            storage: StorageConfig::default(),
            backup: BackupConfig::default(),
        }
    }
}

/// HTTP client and fetch behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Base origin used to absolutize relative post links
    #[serde(default = "defaults::base_url")]
    pub base_url: String,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            base_url: defaults::base_url(),
        }
    }
}

/// CSS selectors describing one post card on a board page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Selector for a post card element
    #[serde(default = "defaults::card_selector")]
    pub card: String,

    /// Selector for the dedicated title element inside a card
    #[serde(default = "defaults::title_selector")]
    pub title: String,

    /// Fallback selector when the title element is absent
    #[serde(default = "defaults::content_selector")]
    pub content: String,

    /// Selector for the wrapper link element inside a card
    #[serde(default = "defaults::link_selector")]
    pub link: String,

    /// HTML attribute carrying the link target
    #[serde(default = "defaults::link_attr")]
    pub link_attr: String,
}

impl SelectorConfig {
    /// Check that every selector parses.
    pub fn validate(&self) -> Result<()> {
        for selector in [&self.card, &self.title, &self.content, &self.link] {
            scraper::Selector::parse(selector)
                .map_err(|e| AppError::selector(selector, format!("{e:?}")))?;
        }
        Ok(())
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: defaults::card_selector(),
            title: defaults::title_selector(),
            content: defaults::content_selector(),
            link: defaults::link_selector(),
            link_attr: defaults::link_attr(),
        }
    }
}

/// A board to watch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Full URL of the board page
    pub url: String,
}

/// Announcement header selection.
///
/// Rules are evaluated in order; the first whose `contains` is a substring
/// of the source URL wins. The fallback is a rule that matches everything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnounceConfig {
    #[serde(default = "defaults::announce_rules")]
    pub rules: Vec<HeaderRule>,

    #[serde(default = "defaults::announce_fallback")]
    pub fallback: HeaderRule,
}

impl AnnounceConfig {
    /// Pick the header rule for a source URL.
    pub fn classify(&self, url: &str) -> &HeaderRule {
        self.rules
            .iter()
            .find(|rule| url.contains(&rule.contains))
            .unwrap_or(&self.fallback)
    }
}

impl Default for AnnounceConfig {
    fn default() -> Self {
        Self {
            rules: defaults::announce_rules(),
            fallback: defaults::announce_fallback(),
        }
    }
}

/// Emoji/header pair chosen by URL substring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderRule {
    /// URL substring to match (empty matches everything)
    #[serde(default)]
    pub contains: String,

    /// Emoji prefix for the announcement header
    pub emoji: String,

    /// Header text for the announcement
    pub header: String,
}

/// Baseline persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the baseline JSON file
    #[serde(default = "defaults::cache_file")]
    pub cache_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cache_file: defaults::cache_file(),
        }
    }
}

/// Git backup settings for the baseline file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Whether to commit and push the baseline after saving
    #[serde(default = "defaults::backup_enabled")]
    pub enabled: bool,

    /// Committer name for the backup commit
    #[serde(default = "defaults::committer_name")]
    pub committer_name: String,

    /// Committer email for the backup commit
    #[serde(default = "defaults::committer_email")]
    pub committer_email: String,

    /// Fixed commit message
    #[serde(default = "defaults::commit_message")]
    pub message: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::backup_enabled(),
            committer_name: defaults::committer_name(),
            committer_email: defaults::committer_email(),
            message: defaults::commit_message(),
        }
    }
}

mod defaults {
    use super::{HeaderRule, SourceConfig};

    // Watcher defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; quiwatch/1.0)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn base_url() -> String {
        "https://www.qui.help/".into()
    }

    // Selector defaults
    pub fn card_selector() -> String {
        "article.post-card".into()
    }
    pub fn title_selector() -> String {
        ".post-title".into()
    }
    pub fn content_selector() -> String {
        ".post-content".into()
    }
    pub fn link_selector() -> String {
        "a.post-content-wrapper".into()
    }
    pub fn link_attr() -> String {
        "href".into()
    }

    // Source defaults
    pub fn sources() -> Vec<SourceConfig> {
        vec![
            SourceConfig {
                url: "https://www.qui.help/forum/find-psychologist".to_string(),
            },
            SourceConfig {
                url: "https://www.qui.help/forum/ask-psychologist".to_string(),
            },
        ]
    }

    // Announcement defaults
    pub fn announce_rules() -> Vec<HeaderRule> {
        vec![
            HeaderRule {
                contains: "find-psychologist".to_string(),
                emoji: "🔍".to_string(),
                header: "Новий запит!".to_string(),
            },
            HeaderRule {
                contains: "ask-psychologist".to_string(),
                emoji: "❓".to_string(),
                header: "Нове питання!".to_string(),
            },
        ]
    }
    pub fn announce_fallback() -> HeaderRule {
        HeaderRule {
            contains: String::new(),
            emoji: "🆕".to_string(),
            header: "Нова публікація!".to_string(),
        }
    }

    // Storage defaults
    pub fn cache_file() -> String {
        "posts_cache.json".into()
    }

    // Backup defaults
    pub fn backup_enabled() -> bool {
        true
    }
    pub fn committer_name() -> String {
        "QUI Bot".into()
    }
    pub fn committer_email() -> String {
        "bot@github.com".into()
    }
    pub fn commit_message() -> String {
        "Update posts cache".into()
    }
}
