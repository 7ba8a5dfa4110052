//! Content storage seam.
//!
//! A [`ContentStore`] yields raw, unvalidated records per category. Turning
//! them into [`ContentItem`](crate::model::ContentItem)s (status parsing,
//! defaults, link extraction) is the reader's job, so alternative stores
//! only have to surface what they hold.

use std::io;
use std::path::{Path, PathBuf};

use super::markdown;
use crate::model::Category;

/// One stored document with its metadata still in raw form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub slug: String,
    pub title: Option<String>,
    pub status: Option<String>,
    pub target_keywords: Vec<String>,
    pub word_count: Option<u64>,
    pub body_text: String,
}

/// What a store found at one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Record(RawRecord),
    /// The document exists but could not be decoded.
    Malformed { location: String, reason: String },
}

pub trait ContentStore {
    /// Human-readable description of where the store reads from.
    fn location(&self) -> String;

    /// Whether the store's root exists at all.
    fn is_available(&self) -> bool;

    /// Documents in one category, in a stable order.
    ///
    /// A category with no backing location yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the category location exists but cannot be
    /// enumerated.
    fn list(&self, category: Category) -> io::Result<Vec<Listing>>;
}

/// Markdown files under `<root>/<category>/*.md`.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_document(path: &Path, slug: String) -> Listing {
        let location = path.display().to_string();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                return Listing::Malformed {
                    location,
                    reason: e.to_string(),
                };
            }
        };
        let Ok(text) = String::from_utf8(bytes) else {
            return Listing::Malformed {
                location,
                reason: "not valid UTF-8".to_string(),
            };
        };
        match decode_markdown(slug, &text) {
            Ok(record) => Listing::Record(record),
            Err(reason) => Listing::Malformed { location, reason },
        }
    }
}

impl ContentStore for FsContentStore {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn is_available(&self) -> bool {
        self.root.is_dir()
    }

    fn list(&self, category: Category) -> io::Result<Vec<Listing>> {
        let dir = self.root.join(category.as_str());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            files.push((stem.to_string(), path.clone()));
        }
        files.sort_by(|a, b| a.1.file_name().cmp(&b.1.file_name()));

        Ok(files
            .into_iter()
            .map(|(slug, path)| Self::read_document(&path, slug))
            .collect())
    }
}

/// Decode a markdown document with optional YAML frontmatter.
fn decode_markdown(slug: String, text: &str) -> Result<RawRecord, String> {
    let (yaml, body) = markdown::split_frontmatter(text);
    let frontmatter = match yaml {
        Some(yaml) => markdown::parse_frontmatter(yaml)
            .map_err(|e| format!("invalid frontmatter: {e}"))?,
        None => markdown::Frontmatter::default(),
    };
    Ok(RawRecord {
        slug,
        title: frontmatter.title,
        status: frontmatter.status,
        target_keywords: frontmatter.target_keywords.unwrap_or_default(),
        word_count: frontmatter.word_count,
        body_text: body.to_string(),
    })
}

/// In-memory store, for callers that already hold their documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<(Category, Listing)>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, category: Category, record: RawRecord) -> Self {
        self.records.push((category, Listing::Record(record)));
        self
    }

    #[must_use]
    pub fn with_listing(mut self, category: Category, listing: Listing) -> Self {
        self.records.push((category, listing));
        self
    }
}

impl ContentStore for MemoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn is_available(&self) -> bool {
        true
    }

    fn list(&self, category: Category) -> io::Result<Vec<Listing>> {
        Ok(self
            .records
            .iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, listing)| listing.clone())
            .collect())
    }
}
