use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::{fmt, str::FromStr};

/// The three content buckets the site is organized into.
///
/// Declaration order is the discovery order used by the inventory reader and
/// the tie-break order used by the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Evergreen explainers (`/learn/`).
    #[serde(alias = "educational")]
    Learn,
    /// Topical, market-driven coverage (`/markets/`).
    #[serde(alias = "topical")]
    Markets,
    /// Commercial comparison and review pages (`/best/`).
    #[serde(alias = "commercial")]
    Best,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Learn, Self::Markets, Self::Best];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Learn => "learn",
            Self::Markets => "markets",
            Self::Best => "best",
        }
    }
}

/// Publication state of a content item, as recorded in its frontmatter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Draft,
    Published,
    Rejected,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Rejected => "rejected",
        }
    }
}

/// Site-relative URL for a piece of content: `/{category}/{slug}`.
#[must_use]
pub fn content_url(category: Category, slug: &str) -> String {
    format!("/{}/{slug}", category.as_str())
}

/// A slug is one URL path segment of `[a-z0-9-]`, so it always names a file
/// directly inside its category directory.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Case-insensitive keyword set.
///
/// Keywords are trimmed and lower-cased on insertion; empty strings are
/// dropped. Iteration order is lexicographic, which keeps every derived
/// output (overlap sets, JSON) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, keyword: &str) -> bool {
        let folded = keyword.trim().to_lowercase();
        if folded.is_empty() {
            return false;
        }
        self.0.insert(folded)
    }

    #[must_use]
    pub fn contains(&self, keyword: &str) -> bool {
        self.0.contains(&keyword.trim().to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Keywords present in both sets, in lexicographic order.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> BTreeSet<String> {
        self.0.intersection(&other.0).cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for keyword in iter {
            set.insert(keyword.as_ref());
        }
        set
    }
}

impl<'de> Deserialize<'de> for KeywordSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

/// One published or drafted piece of content, as observed in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub slug: String,
    pub category: Category,
    pub title: String,
    pub status: Status,
    pub target_keywords: KeywordSet,
    /// Internal link targets in body order. May repeat.
    pub outbound_links: Vec<String>,
    pub word_count: u64,
}

impl ContentItem {
    #[must_use]
    pub fn url(&self) -> String {
        content_url(self.category, &self.slug)
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == Status::Published
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {expected}: '{got}'")]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "learn" | "educational" => Ok(Self::Learn),
            "markets" | "topical" => Ok(Self::Markets),
            "best" | "commercial" => Ok(Self::Best),
            _ => Err(ParseEnumError {
                expected: "category",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}
