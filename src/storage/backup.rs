// src/storage/backup.rs

//! Git backup of the baseline file.
//!
//! The baseline lives inside a git checkout; after each run the updated
//! file is staged, committed with a fixed message, and pushed. The caller
//! treats any failure as non-fatal.

use std::path::PathBuf;

use tokio::process::Command;

use crate::error::{AppError, Result};
use crate::models::BackupConfig;

/// Stages, commits, and pushes the baseline file.
pub struct BackupSync {
    repo_dir: PathBuf,
    file: String,
    config: BackupConfig,
}

impl BackupSync {
    /// Create a backup sync for `file` (relative to `repo_dir`, where git
    /// commands run).
    pub fn new(repo_dir: impl Into<PathBuf>, file: impl Into<String>, config: BackupConfig) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            file: file.into(),
            config,
        }
    }

    /// Record the current baseline file in the remote repository.
    ///
    /// The commit and push are skipped when the staged file matches HEAD,
    /// so a run that found nothing new does not fail on an empty commit.
    pub async fn push(&self) -> Result<()> {
        self.git(&["add", "--", &self.file]).await?;

        if !self.staged_changes().await? {
            log::debug!("Baseline unchanged; skipping backup commit");
            return Ok(());
        }

        let name = format!("user.name={}", self.config.committer_name);
        let email = format!("user.email={}", self.config.committer_email);
        self.git(&[
            "-c",
            &name,
            "-c",
            &email,
            "commit",
            "-m",
            &self.config.message,
        ])
        .await?;

        self.git(&["push"]).await?;
        Ok(())
    }

    /// Whether the staged copy of the baseline differs from HEAD.
    async fn staged_changes(&self) -> Result<bool> {
        let output = Command::new("git")
            .args(["diff", "--cached", "--quiet", "--", &self.file])
            .current_dir(&self.repo_dir)
            .output()
            .await
            .map_err(|e| AppError::backup(format!("git diff failed to start: {e}")))?;

        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(AppError::backup(format!(
                "git diff --cached failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }

    /// Run one git subcommand, failing on a non-zero exit.
    async fn git(&self, args: &[&str]) -> Result<()> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .await
            .map_err(|e| {
                AppError::backup(format!("git {} failed to start: {e}", args.join(" ")))
            })?;

        if !output.status.success() {
            return Err(AppError::backup(format!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    async fn git_in(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .await
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    async fn init_repo_with_cache(dir: &Path) {
        git_in(dir, &["init", "-q"]).await;
        tokio::fs::write(dir.join("posts_cache.json"), b"{}\n")
            .await
            .unwrap();
        git_in(dir, &["add", "posts_cache.json"]).await;
        git_in(
            dir,
            &[
                "-c",
                "user.name=test",
                "-c",
                "user.email=test@example.com",
                "commit",
                "-q",
                "-m",
                "seed",
            ],
        )
        .await;
    }

    #[tokio::test]
    async fn test_unchanged_baseline_skips_commit_and_push() {
        let tmp = TempDir::new().unwrap();
        init_repo_with_cache(tmp.path()).await;

        let sync = BackupSync::new(tmp.path(), "posts_cache.json", BackupConfig::default());
        // No remote is configured, so reaching the push step would fail.
        sync.push().await.unwrap();
    }

    #[tokio::test]
    async fn test_changed_baseline_commits_before_push_fails() {
        let tmp = TempDir::new().unwrap();
        init_repo_with_cache(tmp.path()).await;

        tokio::fs::write(tmp.path().join("posts_cache.json"), b"{\"siteA\": []}\n")
            .await
            .unwrap();

        let sync = BackupSync::new(tmp.path(), "posts_cache.json", BackupConfig::default());
        // The commit succeeds but the push has no remote to talk to.
        assert!(sync.push().await.is_err());

        let output = Command::new("git")
            .args(["log", "-1", "--format=%s"])
            .current_dir(tmp.path())
            .output()
            .await
            .unwrap();
        let subject = String::from_utf8_lossy(&output.stdout);
        assert_eq!(subject.trim(), "Update posts cache");
    }
}
