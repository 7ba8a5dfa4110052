//! Persisting drafted articles as markdown with YAML frontmatter.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::inventory::markdown;
use crate::model::{Category, KeywordSet, Status, content_url, is_valid_slug};

/// An article as returned by the drafting step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    #[serde(alias = "bucket")]
    pub category: Category,
    pub slug: String,
    pub title: String,
    /// Markdown body. Frontmatter already present here is discarded on save.
    pub content: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub target_keywords: KeywordSet,
    /// Defaults to the time of saving.
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl ArticleDraft {
    /// Parse a drafting response.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::Parse`] when the JSON does not describe a draft,
    /// and [`DraftError::EmptySlug`] or [`DraftError::InvalidSlug`] when the
    /// slug cannot name a file under its category directory.
    pub fn from_json(raw: &str) -> Result<Self, DraftError> {
        let draft: Self = serde_json::from_str(raw).map_err(DraftError::Parse)?;
        check_slug(&draft.slug)?;
        Ok(draft)
    }

    #[must_use]
    pub fn url(&self) -> String {
        content_url(self.category, &self.slug)
    }

    /// The body with any leading frontmatter removed.
    #[must_use]
    pub fn body(&self) -> &str {
        let (_, body) = markdown::split_frontmatter(&self.content);
        body.trim()
    }

    /// Render the file contents: frontmatter block followed by the body.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::Serialize`] if the frontmatter cannot be encoded.
    pub fn render(&self, now: DateTime<Utc>) -> Result<String, DraftError> {
        let body = self.body();
        let generated_at = self
            .generated_at
            .unwrap_or(now)
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let frontmatter = DraftFrontmatter {
            title: &self.title,
            slug: &self.slug,
            category: self.category,
            meta_description: &self.meta_description,
            target_keywords: &self.target_keywords,
            generated_at,
            word_count: markdown::word_count(body),
            status: Status::Draft,
        };
        let yaml = serde_yaml::to_string(&frontmatter).map_err(DraftError::Serialize)?;
        Ok(format!("---\n{yaml}---\n\n{body}\n"))
    }
}

#[derive(Serialize)]
struct DraftFrontmatter<'a> {
    title: &'a str,
    slug: &'a str,
    category: Category,
    meta_description: &'a str,
    target_keywords: &'a KeywordSet,
    generated_at: String,
    word_count: u64,
    status: Status,
}

fn check_slug(slug: &str) -> Result<(), DraftError> {
    if slug.trim().is_empty() {
        return Err(DraftError::EmptySlug);
    }
    if !is_valid_slug(slug) {
        return Err(DraftError::InvalidSlug {
            slug: slug.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("invalid draft JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("draft slug must not be empty")]
    EmptySlug,
    #[error("invalid slug '{slug}': use lowercase letters, digits and hyphens")]
    InvalidSlug { slug: String },
    #[error("failed to encode frontmatter: {0}")]
    Serialize(#[source] serde_yaml::Error),
    #[error("{} already exists", path.display())]
    Exists { path: PathBuf },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait DraftStore {
    /// Persist a draft and return where it landed.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError`] when the draft cannot be encoded or written.
    fn save(&self, draft: &ArticleDraft) -> Result<PathBuf, DraftError>;
}

/// Writes `<content_root>/<category>/<slug>.md`.
#[derive(Debug, Clone)]
pub struct FsDraftStore {
    content_root: PathBuf,
    overwrite: bool,
}

impl FsDraftStore {
    #[must_use]
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
            overwrite: false,
        }
    }

    /// Replace an existing file at the draft's path instead of refusing.
    #[must_use]
    pub const fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn path_for(&self, category: Category, slug: &str) -> PathBuf {
        self.content_root
            .join(category.as_str())
            .join(format!("{slug}.md"))
    }

    fn write(path: &Path, contents: &str) -> Result<(), DraftError> {
        let to_err = |source| DraftError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(to_err)?;
        }
        std::fs::write(path, contents).map_err(to_err)
    }
}

impl DraftStore for FsDraftStore {
    #[instrument(skip_all, fields(url = %draft.url()))]
    fn save(&self, draft: &ArticleDraft) -> Result<PathBuf, DraftError> {
        check_slug(&draft.slug)?;
        let path = self.path_for(draft.category, &draft.slug);
        if path.exists() && !self.overwrite {
            return Err(DraftError::Exists { path });
        }
        let contents = draft.render(Utc::now())?;
        Self::write(&path, &contents)?;
        info!(path = %path.display(), "draft saved");
        Ok(path)
    }
}
