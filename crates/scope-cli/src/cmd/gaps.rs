//! `scope gaps`: core educational topics not yet covered.

use std::io::Write;
use std::path::Path;

use clap::Args;
use scope_core::config::ProjectConfig;
use scope_core::model::CandidateTopic;
use scope_core::topics::content_gaps;

use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `scope gaps`.
#[derive(Args, Debug, Default)]
pub struct GapsArgs {
    /// Show at most this many gaps, highest priority first.
    #[arg(long, short)]
    pub limit: Option<usize>,
}

pub fn run_gaps(
    args: &GapsArgs,
    output: OutputMode,
    project_root: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let inventory = super::read_inventory_or_empty(project_root, config);
    let mut gaps = content_gaps(&inventory);
    // Stable, so equal priorities keep catalogue order.
    gaps.sort_by_key(|t| std::cmp::Reverse(t.priority));
    if let Some(limit) = args.limit {
        gaps.truncate(limit);
    }
    render_mode(
        output,
        &gaps,
        |g, w| render_gaps_text(g, w),
        |g, w| render_gaps_pretty(g, w),
    )
}

fn render_gaps_text(gaps: &[CandidateTopic], w: &mut dyn Write) -> std::io::Result<()> {
    for topic in gaps {
        writeln!(w, "{}  {}  {}", topic.priority, topic.url(), topic.title)?;
    }
    Ok(())
}

fn render_gaps_pretty(gaps: &[CandidateTopic], w: &mut dyn Write) -> std::io::Result<()> {
    if gaps.is_empty() {
        return writeln!(w, "Every core topic is covered.");
    }
    pretty_section(w, &format!("Content gaps ({})", gaps.len()))?;
    for topic in gaps {
        writeln!(w, "P{:<3} {}", topic.priority, topic.title)?;
        writeln!(w, "     {}", topic.url())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scope_core::topics::core_topics;

    #[test]
    fn text_has_one_line_per_gap() {
        let gaps = core_topics();
        let mut buf = Vec::new();
        render_gaps_text(&gaps, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s.lines().count(), gaps.len());
        assert!(s.lines().all(|l| l.contains("  /learn/")));
    }

    #[test]
    fn no_gaps_pretty_message() {
        let mut buf = Vec::new();
        render_gaps_pretty(&[], &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Every core topic is covered.\n"
        );
    }
}
