//! `scope phase`: report the active growth phase.

use std::io::Write;
use std::path::Path;

use clap::Args;
use scope_core::config::ProjectConfig;
use scope_core::model::ContentMix;
use scope_plan::{PhaseResolution, resolve_from_inventory};

use crate::output::{OutputMode, pretty_kv, pretty_section, render};

/// Arguments for `scope phase`.
#[derive(Args, Debug, Default)]
pub struct PhaseArgs {}

pub fn run_phase(
    _args: &PhaseArgs,
    output: OutputMode,
    project_root: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let inventory = super::read_inventory(project_root, config);
    let resolution = resolve_from_inventory(inventory.as_ref(), &config.phases);
    render(output, &resolution, |r, w| render_phase_human(r, w))
}

pub fn format_mix(mix: &ContentMix) -> String {
    mix.ranked()
        .iter()
        .map(|(category, weight)| format!("{category} {weight:.2}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_phase_human(resolution: &PhaseResolution, w: &mut dyn Write) -> std::io::Result<()> {
    let phase = resolution.phase();
    pretty_section(w, &format!("Phase: {} ({})", phase.name, phase.kind))?;
    match resolution {
        PhaseResolution::Resolved { published, .. } => {
            pretty_kv(w, "published", published.to_string())?;
        }
        PhaseResolution::Defaulted { reason, .. } => {
            pretty_kv(w, "defaulted", reason)?;
        }
    }
    pretty_kv(w, "content mix", format_mix(&phase.content_mix))?;
    pretty_kv(w, "activates at", phase.min_published.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scope_core::config::PhasesConfig;
    use scope_core::inventory::InventoryError;

    #[test]
    fn mix_is_listed_by_rank() {
        assert_eq!(
            format_mix(&ContentMix::planner_default()),
            "learn 0.50, markets 0.35, best 0.15"
        );
    }

    #[test]
    fn defaulted_phase_shows_reason() {
        let err = InventoryError::RootMissing {
            location: "content".to_string(),
        };
        let resolution = resolve_from_inventory(Err(&err), &PhasesConfig::default());
        let mut buf = Vec::new();
        render_phase_human(&resolution, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.starts_with("Phase: Foundation (foundation)"));
        assert!(s.contains("content root not found"));
    }
}
