// src/services/posts.rs

//! Post scraper service.
//!
//! Fetches a board page and extracts the posts currently listed on it
//! using the configured CSS selectors.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Config, Post};
use crate::utils::text::{normalize_whitespace, truncate_title};
use crate::utils::url::absolutize;

/// Service for scraping posts from board pages.
pub struct PostScraper {
    config: Arc<Config>,
    client: Client,
    card_sel: Selector,
    title_sel: Selector,
    content_sel: Selector,
    link_sel: Selector,
}

impl PostScraper {
    /// Create a new post scraper with the given configuration.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.watcher.user_agent)
            .timeout(Duration::from_secs(config.watcher.timeout_secs))
            .build()?;

        let card_sel = Self::parse_selector(&config.selectors.card)?;
        let title_sel = Self::parse_selector(&config.selectors.title)?;
        let content_sel = Self::parse_selector(&config.selectors.content)?;
        let link_sel = Self::parse_selector(&config.selectors.link)?;

        Ok(Self {
            config,
            client,
            card_sel,
            title_sel,
            content_sel,
            link_sel,
        })
    }

    /// Fetch a board page and extract its posts, top of page first.
    ///
    /// Fails on any transport error or non-2xx status; the caller decides
    /// what a failed source means for the run.
    pub async fn fetch_posts(&self, url: &str) -> Result<Vec<Post>> {
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(self.extract_posts(&html))
    }

    /// Extract posts from raw board markup, in document order.
    pub fn extract_posts(&self, html: &str) -> Vec<Post> {
        let document = Html::parse_document(html);

        let mut posts = Vec::new();
        for card in document.select(&self.card_sel) {
            if let Some(post) = self.parse_card(&card) {
                posts.push(post);
            }
        }
        posts
    }

    /// Parse a single post card. Cards without a usable title or link
    /// yield nothing.
    fn parse_card(&self, card: &ElementRef) -> Option<Post> {
        // Dedicated title element first, general content element as fallback.
        let title_elem = card
            .select(&self.title_sel)
            .next()
            .or_else(|| card.select(&self.content_sel).next())?;

        let raw_title: String = title_elem.text().collect();
        let title = truncate_title(&normalize_whitespace(&raw_title));
        if title.is_empty() {
            return None;
        }

        let link_elem = card.select(&self.link_sel).next()?;
        let href = link_elem
            .value()
            .attr(&self.config.selectors.link_attr)?
            .trim();
        if href.is_empty() {
            return None;
        }

        let link = absolutize(&self.config.watcher.base_url, href);
        Some(Post { title, link })
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraper() -> PostScraper {
        PostScraper::new(Arc::new(Config::default())).unwrap()
    }

    const PAGE: &str = r#"
        <html><body>
          <article class="post-card">
            <a class="post-content-wrapper" href="/forum/find-psychologist/post-2">
              <div class="post-title">Шукаю психолога</div>
              <div class="post-content">Довший опис запиту</div>
            </a>
          </article>
          <article class="post-card">
            <a class="post-content-wrapper" href="https://www.qui.help/forum/find-psychologist/post-1">
              <div class="post-content">Запит без окремого заголовка</div>
            </a>
          </article>
        </body></html>
    "#;

    #[test]
    fn test_extracts_posts_in_document_order() {
        let posts = scraper().extract_posts(PAGE);

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Шукаю психолога");
        assert_eq!(
            posts[0].link,
            "https://www.qui.help/forum/find-psychologist/post-2"
        );
        assert_eq!(
            posts[1].link,
            "https://www.qui.help/forum/find-psychologist/post-1"
        );
    }

    #[test]
    fn test_content_fallback_when_title_missing() {
        let posts = scraper().extract_posts(PAGE);
        assert_eq!(posts[1].title, "Запит без окремого заголовка");
    }

    #[test]
    fn test_title_element_wins_over_content() {
        let posts = scraper().extract_posts(PAGE);
        assert_eq!(posts[0].title, "Шукаю психолога");
    }

    #[test]
    fn test_skips_card_without_link() {
        let html = r#"
            <article class="post-card">
              <div class="post-title">Без посилання</div>
            </article>
        "#;
        assert!(scraper().extract_posts(html).is_empty());
    }

    #[test]
    fn test_skips_card_with_empty_href() {
        let html = r#"
            <article class="post-card">
              <a class="post-content-wrapper" href="">
                <div class="post-title">Порожній href</div>
              </a>
            </article>
        "#;
        assert!(scraper().extract_posts(html).is_empty());
    }

    #[test]
    fn test_skips_card_without_any_title_text() {
        let html = r#"
            <article class="post-card">
              <a class="post-content-wrapper" href="/forum/x">
                <div class="post-title">   </div>
              </a>
            </article>
        "#;
        assert!(scraper().extract_posts(html).is_empty());
    }

    #[test]
    fn test_normalizes_title_whitespace() {
        let html = r#"
            <article class="post-card">
              <a class="post-content-wrapper" href="/forum/x">
                <div class="post-title">
                    Потрібна    порада
                </div>
              </a>
            </article>
        "#;
        let posts = scraper().extract_posts(html);
        assert_eq!(posts[0].title, "Потрібна порада");
    }

    #[test]
    fn test_truncates_long_titles() {
        let long = "а".repeat(150);
        let html = format!(
            r#"
            <article class="post-card">
              <a class="post-content-wrapper" href="/forum/x">
                <div class="post-title">{}</div>
              </a>
            </article>
            "#,
            long
        );
        let posts = scraper().extract_posts(&html);
        assert_eq!(posts[0].title.chars().count(), 100);
        assert!(posts[0].title.ends_with("..."));
    }

    #[test]
    fn test_page_without_cards_yields_nothing() {
        assert!(scraper().extract_posts("<html><body>nothing</body></html>").is_empty());
        assert!(scraper().extract_posts("not markup at all").is_empty());
    }

    #[test]
    fn test_rejects_invalid_selector() {
        let mut config = Config::default();
        config.selectors.card = "[[invalid".to_string();
        assert!(PostScraper::new(Arc::new(config)).is_err());
    }
}
