// src/pipeline/run.rs

//! Single watch pass over all configured sources.

use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, RunStats};
use crate::pipeline::diff;
use crate::services::{Notifier, PostScraper};
use crate::storage::{BackupSync, BaselineStore};

/// Run the watcher once: fetch every source in order, announce new posts
/// oldest-first, replace the baseline, and back it up.
///
/// A failed fetch means zero posts for that source this run; the other
/// sources, the baseline save, and the backup still happen. A failed
/// delivery skips that message only.
pub async fn run_watcher(config: &Config, store: &BaselineStore) -> Result<RunStats> {
    let started_at = Utc::now();

    let scraper = PostScraper::new(Arc::new(config.clone()))?;
    let notifier = Notifier::from_env();

    let mut baseline = store.load().await?;

    let mut sources_failed = 0;
    let mut posts_seen = 0;
    let mut announced = 0;
    let mut delivery_failures = 0;

    for source in &config.sources {
        log::info!("Checking {}", source.url);

        let posts = match scraper.fetch_posts(&source.url).await {
            Ok(posts) => posts,
            Err(error) => {
                sources_failed += 1;
                log::warn!("Failed to fetch {}: {}", source.url, error);
                Vec::new()
            }
        };
        log::info!("Found {} posts on {}", posts.len(), source.url);
        posts_seen += posts.len();

        let seen = baseline
            .get(&source.url)
            .map(|links| links.as_slice())
            .unwrap_or(&[]);
        let fresh = diff::new_posts(&posts, seen);

        let rule = config.announce.classify(&source.url);
        for post in &fresh {
            match notifier.announce(post, rule).await {
                Ok(()) => {
                    announced += 1;
                    log::info!("Announced: {}", post.title);
                }
                Err(error) => {
                    delivery_failures += 1;
                    log::warn!("Failed to deliver announcement for {}: {}", post.link, error);
                }
            }
        }

        // Replace the entry with everything currently on the page, even
        // when the fetch failed and that is nothing at all.
        let links = posts.into_iter().map(|post| post.link).collect();
        baseline.insert(source.url.clone(), links);
    }

    store.save(&baseline).await?;
    log::info!("Baseline saved to {}", store.path().display());

    if config.backup.enabled {
        let backup = BackupSync::new(
            ".",
            store.path().to_string_lossy().into_owned(),
            config.backup.clone(),
        );
        if let Err(error) = backup.push().await {
            log::warn!("Baseline backup failed: {}", error);
        }
    }

    let stats = RunStats {
        started_at,
        finished_at: Utc::now(),
        sources_total: config.sources.len(),
        sources_failed,
        posts_seen,
        announced,
        delivery_failures,
    };

    log::info!(
        "Run complete: {}/{} sources ok, {} posts seen, {} announced, {} delivery failures",
        stats.sources_total - stats.sources_failed,
        stats.sources_total,
        stats.posts_seen,
        stats.announced,
        stats.delivery_failures
    );

    Ok(stats)
}
