use serde::{Deserialize, Serialize};

use super::item::{Category, KeywordSet, content_url};

/// A proposed article produced by the discovery step.
///
/// Candidates are ephemeral: they are produced fresh for each planning cycle
/// and only persisted as part of a run log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTopic {
    #[serde(alias = "bucket")]
    pub category: Category,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_keywords: KeywordSet,
    /// Higher is more urgent.
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default, alias = "market_data_needed")]
    pub data_requirements: Vec<String>,
}

impl CandidateTopic {
    #[must_use]
    pub fn url(&self) -> String {
        content_url(self.category, &self.slug)
    }
}
