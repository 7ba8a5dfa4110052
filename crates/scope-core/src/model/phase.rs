use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::item::Category;

/// The three ordered growth stages of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Foundation,
    Growth,
    Monetization,
}

impl PhaseKind {
    pub const ALL: [Self; 3] = [Self::Foundation, Self::Growth, Self::Monetization];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Growth => "growth",
            Self::Monetization => "monetization",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a content mix violates its invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MixError {
    #[error("weight for {category} must be a finite, non-negative number (got {weight})")]
    InvalidWeight { category: Category, weight: f64 },
    #[error("content mix needs at least one category with positive weight")]
    NoPositiveWeight,
}

/// Relative target proportions per category.
///
/// Weights are relative: they need not sum to 1. Every weight is finite and
/// non-negative, and at least one is positive. Categories absent from the
/// map have weight zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Category, f64>", into = "BTreeMap<Category, f64>")]
pub struct ContentMix(BTreeMap<Category, f64>);

impl ContentMix {
    /// Validate and build a mix.
    ///
    /// # Errors
    ///
    /// Returns [`MixError`] for a negative or non-finite weight, or when no
    /// category has a positive weight.
    pub fn new(weights: BTreeMap<Category, f64>) -> Result<Self, MixError> {
        for (&category, &weight) in &weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(MixError::InvalidWeight { category, weight });
            }
        }
        if !weights.values().any(|&w| w > 0.0) {
            return Err(MixError::NoPositiveWeight);
        }
        Ok(Self(weights))
    }

    /// Build a mix from a fixed table known to be valid.
    fn from_table(learn: f64, markets: f64, best: f64) -> Self {
        Self(BTreeMap::from([
            (Category::Learn, learn),
            (Category::Markets, markets),
            (Category::Best, best),
        ]))
    }

    /// The mix the planner uses when a phase declares none.
    #[must_use]
    pub fn planner_default() -> Self {
        Self::from_table(0.50, 0.35, 0.15)
    }

    #[must_use]
    pub fn weight(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    /// Categories with positive weight, by descending weight.
    ///
    /// Equal weights keep category declaration order.
    #[must_use]
    pub fn ranked(&self) -> Vec<(Category, f64)> {
        let mut ranked: Vec<(Category, f64)> = self
            .0
            .iter()
            .filter(|&(_, &w)| w > 0.0)
            .map(|(&c, &w)| (c, w))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(&c, &w)| (c, w))
    }
}

impl TryFrom<BTreeMap<Category, f64>> for ContentMix {
    type Error = MixError;

    fn try_from(value: BTreeMap<Category, f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContentMix> for BTreeMap<Category, f64> {
    fn from(value: ContentMix) -> Self {
        value.0
    }
}

/// A named growth stage and the category mix it targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub kind: PhaseKind,
    pub name: String,
    pub content_mix: ContentMix,
    /// Published-item count at which this phase becomes active.
    pub min_published: usize,
}

impl Phase {
    /// Built-in definition of a phase, used when configuration is absent.
    #[must_use]
    pub fn builtin(kind: PhaseKind) -> Self {
        match kind {
            PhaseKind::Foundation => Self {
                kind,
                name: "Foundation".to_string(),
                content_mix: ContentMix::from_table(0.55, 0.35, 0.10),
                min_published: 0,
            },
            PhaseKind::Growth => Self {
                kind,
                name: "Growth".to_string(),
                content_mix: ContentMix::from_table(0.40, 0.45, 0.15),
                min_published: 50,
            },
            PhaseKind::Monetization => Self {
                kind,
                name: "Monetization".to_string(),
                content_mix: ContentMix::from_table(0.30, 0.45, 0.25),
                min_published: 100,
            },
        }
    }
}
