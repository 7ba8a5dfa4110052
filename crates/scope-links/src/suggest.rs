//! Internal link suggestions for a new article.
//!
//! Rules run in order and each only adds targets not yet suggested:
//!
//! 1. configured core pages that are published,
//! 2. published pages sharing a keyword with the article,
//! 3. for topical (`markets`) articles, the first few published `learn`
//!    pages and then `best` pages, each window sized by config.
//!
//! The combined list is cut to `max_internal_links_per_article`.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use scope_core::config::LinkingConfig;
use scope_core::inventory::ContentInventory;
use scope_core::model::{Category, ContentItem, KeywordSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkReason {
    CorePage,
    KeywordOverlap { keywords: BTreeSet<String> },
    /// Educational page linked from a topical article.
    CrossCategoryPrimary,
    /// Commercial page linked from a topical article.
    CrossCategorySecondary,
}

impl LinkReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CorePage => "core_page",
            Self::KeywordOverlap { .. } => "keyword_overlap",
            Self::CrossCategoryPrimary => "cross_category_primary",
            Self::CrossCategorySecondary => "cross_category_secondary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSuggestion {
    pub target_url: String,
    pub title: String,
    pub reason: LinkReason,
}

/// Accumulates suggestions, refusing repeated targets.
struct Suggestions {
    list: Vec<LinkSuggestion>,
    seen: HashSet<String>,
}

impl Suggestions {
    fn new() -> Self {
        Self {
            list: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    fn push(&mut self, item: &ContentItem, reason: LinkReason) {
        let url = item.url();
        if self.seen.insert(url.clone()) {
            self.list.push(LinkSuggestion {
                target_url: url,
                title: item.title.clone(),
                reason,
            });
        }
    }

    /// Add the first `cap` published pages of `category`, skipping any that
    /// an earlier rule already suggested. Skipped pages still use up the cap.
    fn push_category<'a>(
        &mut self,
        published: impl Iterator<Item = &'a ContentItem>,
        category: Category,
        cap: usize,
        reason: &LinkReason,
    ) {
        for item in published.filter(|i| i.category == category).take(cap) {
            self.push(item, reason.clone());
        }
    }
}

/// Suggest internal links for an article of `category` targeting `keywords`.
///
/// Deterministic for a given inventory, and never repeats a target URL.
#[must_use]
pub fn suggest_links(
    inventory: &ContentInventory,
    category: Category,
    keywords: &KeywordSet,
    config: &LinkingConfig,
) -> Vec<LinkSuggestion> {
    let mut suggestions = Suggestions::new();

    for url in &config.always_link_to {
        if let Some(item) = inventory.get(url).filter(|i| i.is_published()) {
            suggestions.push(item, LinkReason::CorePage);
        }
    }

    if !keywords.is_empty() {
        for item in inventory.published() {
            if suggestions.contains(&item.url()) {
                continue;
            }
            let overlap = keywords.intersection(&item.target_keywords);
            if !overlap.is_empty() {
                suggestions.push(item, LinkReason::KeywordOverlap { keywords: overlap });
            }
        }
    }

    if category == Category::Markets {
        suggestions.push_category(
            inventory.published(),
            Category::Learn,
            config.educational_cap,
            &LinkReason::CrossCategoryPrimary,
        );
        suggestions.push_category(
            inventory.published(),
            Category::Best,
            config.commercial_cap,
            &LinkReason::CrossCategorySecondary,
        );
    }

    let mut list = suggestions.list;
    list.truncate(config.max_internal_links_per_article);
    debug!(%category, suggestions = list.len(), "link suggestions computed");
    list
}
