//! JSON record of one planning run, written to `<logs_dir>/runs/<run_id>.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::model::{CandidateTopic, Category, PhaseKind};

const RUN_ID_FORMAT: &str = "%Y%m%d-%H%M%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLog {
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
    pub phase: PhaseKind,
    pub phase_name: String,
    pub published_count: usize,
    pub budget: usize,
    pub slots: BTreeMap<Category, usize>,
    pub candidates_considered: usize,
    pub articles_planned: usize,
    pub plan: Vec<CandidateTopic>,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to write run log {}: {source}", path.display())]
pub struct RunLogError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Run id for a start time: `YYYYmmdd-HHMMSS`.
#[must_use]
pub fn run_id(at: DateTime<Utc>) -> String {
    at.format(RUN_ID_FORMAT).to_string()
}

impl RunLog {
    /// Path the log is written to under `logs_dir`.
    #[must_use]
    pub fn path_in(&self, logs_dir: &Path) -> PathBuf {
        logs_dir.join("runs").join(format!("{}.json", self.run_id))
    }

    /// Write the log as pretty JSON, creating directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`RunLogError`] when the file cannot be written.
    pub fn write(&self, logs_dir: &Path) -> Result<PathBuf, RunLogError> {
        let path = self.path_in(logs_dir);
        let to_err = |source| RunLogError {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(to_err)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| to_err(std::io::Error::other(e)))?;
        std::fs::write(&path, json).map_err(to_err)?;
        tracing::info!(path = %path.display(), "run log written");
        Ok(path)
    }
}
