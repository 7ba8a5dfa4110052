//! Project configuration.
//!
//! Load order: `<root>/.scope/config.toml` → built-in defaults. A missing
//! file, table or key is never an error; a file that exists but does not
//! parse, or that breaks an invariant, is.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::model::{ContentMix, Phase, PhaseKind};

/// Location of the project config, relative to the project root.
pub const CONFIG_PATH: &str = ".scope/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub phases: PhasesConfig,
    #[serde(default)]
    pub linking: LinkingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_max_articles")]
    pub max_articles_per_run: usize,
    #[serde(default = "default_content_root")]
    pub content_root: PathBuf,
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_articles_per_run: default_max_articles(),
            content_root: default_content_root(),
            logs_dir: default_logs_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkingConfig {
    /// Core pages every new article should link to, when published.
    #[serde(default)]
    pub always_link_to: Vec<String>,
    #[serde(default = "default_max_links")]
    pub max_internal_links_per_article: usize,
    /// Most educational pages suggested to a topical article.
    #[serde(default = "default_educational_cap")]
    pub educational_cap: usize,
    /// Most commercial pages suggested to a topical article.
    #[serde(default = "default_commercial_cap")]
    pub commercial_cap: usize,
    /// Pages with fewer inbound links than this (but more than zero) are
    /// reported as under-linked.
    #[serde(default = "default_under_linked_below")]
    pub under_linked_below: usize,
}

impl Default for LinkingConfig {
    fn default() -> Self {
        Self {
            always_link_to: Vec::new(),
            max_internal_links_per_article: default_max_links(),
            educational_cap: default_educational_cap(),
            commercial_cap: default_commercial_cap(),
            under_linked_below: default_under_linked_below(),
        }
    }
}

/// The three phase definitions, in activation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhasesConfig {
    pub foundation: Phase,
    pub growth: Phase,
    pub monetization: Phase,
}

impl Default for PhasesConfig {
    fn default() -> Self {
        Self {
            foundation: Phase::builtin(PhaseKind::Foundation),
            growth: Phase::builtin(PhaseKind::Growth),
            monetization: Phase::builtin(PhaseKind::Monetization),
        }
    }
}

impl PhasesConfig {
    #[must_use]
    pub const fn get(&self, kind: PhaseKind) -> &Phase {
        match kind {
            PhaseKind::Foundation => &self.foundation,
            PhaseKind::Growth => &self.growth,
            PhaseKind::Monetization => &self.monetization,
        }
    }
}

/// A phase table as written by the user; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct PhaseOverride {
    name: Option<String>,
    content_mix: Option<ContentMix>,
    min_published: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawPhases {
    foundation: Option<PhaseOverride>,
    growth: Option<PhaseOverride>,
    monetization: Option<PhaseOverride>,
}

/// Merge a user table over the built-in phase.
///
/// An absent table keeps the built-in phase whole. A present table without
/// `content_mix` gets the planner's default mix rather than the built-in one.
fn merge_phase(kind: PhaseKind, table: Option<PhaseOverride>) -> Phase {
    let builtin = Phase::builtin(kind);
    let Some(table) = table else {
        return builtin;
    };
    Phase {
        kind,
        name: table.name.unwrap_or(builtin.name),
        content_mix: table.content_mix.unwrap_or_else(ContentMix::planner_default),
        min_published: table.min_published.unwrap_or(builtin.min_published),
    }
}

impl PhasesConfig {
    fn from_raw(raw: RawPhases) -> Result<Self, String> {
        let phases = Self {
            foundation: merge_phase(PhaseKind::Foundation, raw.foundation),
            growth: merge_phase(PhaseKind::Growth, raw.growth),
            monetization: merge_phase(PhaseKind::Monetization, raw.monetization),
        };
        if phases.growth.min_published > phases.monetization.min_published {
            return Err(format!(
                "phase thresholds must ascend: growth.min_published ({}) > monetization.min_published ({})",
                phases.growth.min_published, phases.monetization.min_published
            ));
        }
        Ok(phases)
    }
}

impl<'de> Deserialize<'de> for PhasesConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPhases::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(serde::de::Error::custom)
    }
}

/// Error loading the project config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// Load `<project_root>/.scope/config.toml`, or defaults when it is absent.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read, does not
/// parse, or violates a config invariant.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig, ConfigError> {
    let path = project_root.join(CONFIG_PATH);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no project config; using defaults");
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    let config = parse_project_config(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;

    validate(&config).map_err(|reason| ConfigError::Invalid { path, reason })?;
    Ok(config)
}

/// Parse config text without touching the filesystem.
///
/// # Errors
///
/// Returns the TOML error for malformed input or invalid mixes/thresholds.
pub fn parse_project_config(content: &str) -> Result<ProjectConfig, toml::de::Error> {
    toml::from_str::<ProjectConfig>(content)
}

fn validate(config: &ProjectConfig) -> Result<(), String> {
    // Foundation applies below the growth threshold, so it has no threshold of its own.
    if config.phases.foundation.min_published != 0 {
        return Err(format!(
            "phases.foundation.min_published must be 0 (got {})",
            config.phases.foundation.min_published
        ));
    }
    if config.linking.max_internal_links_per_article == 0 {
        return Err("linking.max_internal_links_per_article must be at least 1".to_string());
    }
    Ok(())
}

impl ProjectConfig {
    /// Content root resolved against the project root.
    #[must_use]
    pub fn content_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.agent.content_root)
    }

    /// Logs directory resolved against the project root.
    #[must_use]
    pub fn logs_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.agent.logs_dir)
    }
}

const fn default_max_articles() -> usize {
    5
}

fn default_content_root() -> PathBuf {
    PathBuf::from("content")
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

const fn default_max_links() -> usize {
    8
}

const fn default_educational_cap() -> usize {
    3
}

const fn default_commercial_cap() -> usize {
    1
}

const fn default_under_linked_below() -> usize {
    2
}
