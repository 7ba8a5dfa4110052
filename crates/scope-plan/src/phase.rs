//! Growth-phase resolution from the published-item count.

use serde::Serialize;
use tracing::{info, warn};

use scope_core::config::PhasesConfig;
use scope_core::inventory::{ContentInventory, InventoryError};
use scope_core::model::Phase;

/// The active phase for a published count.
///
/// Below `growth.min_published` is foundation, below
/// `monetization.min_published` is growth, anything else is monetization.
#[must_use]
pub const fn resolve_phase(published: usize, phases: &PhasesConfig) -> &Phase {
    if published < phases.growth.min_published {
        &phases.foundation
    } else if published < phases.monetization.min_published {
        &phases.growth
    } else {
        &phases.monetization
    }
}

/// Which phase applies, and whether it was actually derived from content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum PhaseResolution {
    Resolved { published: usize, phase: Phase },
    /// The inventory could not be read; the foundation phase is assumed.
    Defaulted { reason: String, phase: Phase },
}

impl PhaseResolution {
    #[must_use]
    pub const fn phase(&self) -> &Phase {
        match self {
            Self::Resolved { phase, .. } | Self::Defaulted { phase, .. } => phase,
        }
    }

    #[must_use]
    pub const fn published(&self) -> Option<usize> {
        match self {
            Self::Resolved { published, .. } => Some(*published),
            Self::Defaulted { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted { .. })
    }
}

/// Resolve the phase from an inventory read, falling back to foundation
/// when the read failed.
#[must_use]
pub fn resolve_from_inventory(
    inventory: Result<&ContentInventory, &InventoryError>,
    phases: &PhasesConfig,
) -> PhaseResolution {
    match inventory {
        Ok(inventory) => {
            let published = inventory.published_count();
            let phase = resolve_phase(published, phases).clone();
            info!(published, phase = %phase.kind, "phase resolved");
            PhaseResolution::Resolved { published, phase }
        }
        Err(e) => {
            warn!(error = %e, "inventory unavailable; assuming foundation phase");
            PhaseResolution::Defaulted {
                reason: e.to_string(),
                phase: phases.foundation.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scope_core::model::PhaseKind;

    #[test]
    fn boundaries_are_inclusive_at_threshold() {
        let phases = PhasesConfig::default();
        let cases = [
            (0, PhaseKind::Foundation),
            (49, PhaseKind::Foundation),
            (50, PhaseKind::Growth),
            (99, PhaseKind::Growth),
            (100, PhaseKind::Monetization),
            (10_000, PhaseKind::Monetization),
        ];
        for (published, expected) in cases {
            assert_eq!(resolve_phase(published, &phases).kind, expected, "{published}");
        }
    }

    #[test]
    fn equal_thresholds_skip_growth() {
        let mut phases = PhasesConfig::default();
        phases.growth.min_published = 10;
        phases.monetization.min_published = 10;
        assert_eq!(resolve_phase(9, &phases).kind, PhaseKind::Foundation);
        assert_eq!(resolve_phase(10, &phases).kind, PhaseKind::Monetization);
    }

    #[test]
    fn failed_read_defaults_to_foundation() {
        let err = InventoryError::RootMissing {
            location: "content".to_string(),
        };
        let resolution = resolve_from_inventory(Err(&err), &PhasesConfig::default());
        assert!(resolution.is_defaulted());
        assert_eq!(resolution.phase().kind, PhaseKind::Foundation);
        assert_eq!(resolution.published(), None);
    }

    #[test]
    fn empty_inventory_resolves_to_foundation() {
        let inventory = ContentInventory::default();
        let resolution = resolve_from_inventory(Ok(&inventory), &PhasesConfig::default());
        assert_eq!(resolution.published(), Some(0));
        assert!(!resolution.is_defaulted());
    }

    #[test]
    fn resolution_serializes_with_tag() {
        let inventory = ContentInventory::default();
        let resolution = resolve_from_inventory(Ok(&inventory), &PhasesConfig::default());
        let json = serde_json::to_value(&resolution).expect("serialize");
        assert_eq!(json["resolution"], "resolved");
        assert_eq!(json["phase"]["kind"], "foundation");
    }
}
