// src/pipeline/diff.rs

//! Diff calculation for new-post announcements.
//!
//! Compares the posts currently listed on a board against the baseline
//! recorded on the previous run to decide what gets announced.

use std::collections::HashSet;

use crate::models::Post;

/// Posts present on the page now but absent from the baseline, in
/// announcement order.
///
/// Membership is an exact match on the post link. The board lists newest
/// posts at the top, so the filtered subsequence is reversed before
/// returning: a batch is always announced oldest-first, never newest-first.
pub fn new_posts(current: &[Post], baseline: &[String]) -> Vec<Post> {
    let seen: HashSet<&str> = baseline.iter().map(String::as_str).collect();

    let mut fresh: Vec<Post> = current
        .iter()
        .filter(|post| !seen.contains(post.link.as_str()))
        .cloned()
        .collect();

    fresh.reverse();
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(n: u32) -> Post {
        Post::new(format!("T{}", n), format!("https://x/{}", n))
    }

    fn links(posts: &[Post]) -> Vec<String> {
        posts.iter().map(|p| p.link.clone()).collect()
    }

    #[test]
    fn test_all_new_batch_is_reversed() {
        // Page order: newest first. Announcement order: oldest first.
        let current = vec![post(3), post(2), post(1)];

        let fresh = new_posts(&current, &[]);
        assert_eq!(fresh, vec![post(1), post(2), post(3)]);
    }

    #[test]
    fn test_unchanged_page_yields_nothing() {
        let current = vec![post(2), post(1)];
        let baseline = links(&current);

        assert!(new_posts(&current, &baseline).is_empty());
        // A second pass with the same inputs is still empty.
        assert!(new_posts(&current, &baseline).is_empty());
    }

    #[test]
    fn test_membership_is_exact_link_match() {
        let current = vec![post(3), post(2), post(1)];
        let baseline = vec!["https://x/2".to_string()];

        let fresh = new_posts(&current, &baseline);
        for p in &current {
            let announced = fresh.iter().any(|f| f.link == p.link);
            assert_eq!(announced, !baseline.contains(&p.link));
        }
    }

    #[test]
    fn test_title_change_alone_is_not_new() {
        let current = vec![Post::new("Edited title", "https://x/1")];
        let baseline = vec!["https://x/1".to_string()];

        assert!(new_posts(&current, &baseline).is_empty());
    }

    #[test]
    fn test_single_new_post_on_top() {
        let current = vec![
            Post::new("T2", "https://x/2"),
            Post::new("T1", "https://x/1"),
        ];
        let baseline = vec!["https://x/1".to_string()];

        let fresh = new_posts(&current, &baseline);
        assert_eq!(fresh, vec![Post::new("T2", "https://x/2")]);
    }

    #[test]
    fn test_empty_baseline_announces_everything() {
        let current = vec![post(2), post(1)];
        let fresh = new_posts(&current, &[]);
        assert_eq!(fresh.len(), 2);
    }
}
