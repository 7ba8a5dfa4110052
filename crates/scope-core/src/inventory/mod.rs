//! Content inventory: every item the site holds, read from a [`ContentStore`].
//!
//! # Discovery order
//!
//! Categories in declaration order (`learn`, `markets`, `best`), then
//! whatever stable order the store lists (file name for the filesystem
//! store). Everything downstream that iterates the inventory inherits this
//! order, which is what keeps suggestions and audits deterministic.
//!
//! # Failure policy
//!
//! A malformed document is skipped with a warning. A category that cannot be
//! listed contributes nothing. Only a store whose root is missing entirely
//! fails the whole read.

pub mod markdown;
pub mod store;

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use tracing::{debug, instrument, warn};

use crate::model::{Category, ContentItem, KeywordSet, Status};
pub use store::{ContentStore, FsContentStore, Listing, MemoryStore, RawRecord};

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("content root not found: {location}")]
    RootMissing { location: String },
}

/// Snapshot of all content items, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentInventory {
    items: Vec<ContentItem>,
    #[serde(skip)]
    by_url: HashMap<String, usize>,
}

/// Per-category and overall counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    pub total: usize,
    pub published: usize,
    pub by_category: BTreeMap<Category, CategoryStats>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub total: usize,
    pub published: usize,
}

impl ContentInventory {
    /// Read every category from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::RootMissing`] if the store has no root.
    #[instrument(skip_all, fields(store = %store.location()))]
    pub fn collect(store: &dyn ContentStore) -> Result<Self, InventoryError> {
        if !store.is_available() {
            return Err(InventoryError::RootMissing {
                location: store.location(),
            });
        }

        let mut items = Vec::new();
        for category in Category::ALL {
            let listings = match store.list(category) {
                Ok(listings) => listings,
                Err(e) => {
                    warn!(%category, error = %e, "category unreadable; treating as empty");
                    continue;
                }
            };
            for listing in listings {
                match listing {
                    Listing::Record(record) => {
                        if let Some(item) = item_from_record(category, record) {
                            items.push(item);
                        }
                    }
                    Listing::Malformed { location, reason } => {
                        warn!(%location, %reason, "skipping malformed content item");
                    }
                }
            }
        }

        debug!(items = items.len(), "inventory collected");
        Ok(Self::from_items(items))
    }

    /// Build an inventory from items already in discovery order.
    ///
    /// A later item whose URL repeats an earlier one is dropped.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = ContentItem>) -> Self {
        let mut inventory = Self::default();
        for item in items {
            let url = item.url();
            if inventory.by_url.contains_key(&url) {
                warn!(%url, "duplicate content url; keeping the first");
                continue;
            }
            inventory.by_url.insert(url, inventory.items.len());
            inventory.items.push(item);
        }
        inventory
    }

    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Published items, in discovery order.
    pub fn published(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter().filter(|item| item.is_published())
    }

    #[must_use]
    pub fn published_count(&self) -> usize {
        self.published().count()
    }

    #[must_use]
    pub fn get(&self, url: &str) -> Option<&ContentItem> {
        self.by_url.get(url).map(|&idx| &self.items[idx])
    }

    #[must_use]
    pub fn contains_url(&self, url: &str) -> bool {
        self.by_url.contains_key(url)
    }

    #[must_use]
    pub fn stats(&self) -> InventoryStats {
        let mut by_category: BTreeMap<Category, CategoryStats> = Category::ALL
            .into_iter()
            .map(|c| (c, CategoryStats::default()))
            .collect();
        for item in &self.items {
            let entry = by_category.entry(item.category).or_default();
            entry.total += 1;
            if item.is_published() {
                entry.published += 1;
            }
        }
        InventoryStats {
            total: self.items.len(),
            published: self.published_count(),
            by_category,
        }
    }
}

fn item_from_record(category: Category, record: RawRecord) -> Option<ContentItem> {
    let status = match record.status.as_deref() {
        None => Status::default(),
        Some(raw) => match Status::from_str(raw) {
            Ok(status) => status,
            Err(e) => {
                warn!(%category, slug = %record.slug, error = %e, "skipping content item");
                return None;
            }
        },
    };

    let outbound_links = markdown::internal_links(&record.body_text);
    let target_keywords: KeywordSet = record.target_keywords.iter().collect();
    let title = record
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| record.slug.clone());

    Some(ContentItem {
        slug: record.slug,
        category,
        title,
        status,
        target_keywords,
        outbound_links,
        word_count: record.word_count.unwrap_or(0),
    })
}
