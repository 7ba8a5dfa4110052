//! `scope plan`: build today's production slate.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Args;
use scope_core::config::ProjectConfig;
use scope_core::error::ErrorCode;
use scope_core::model::CandidateTopic;
use scope_core::runlog::{RunLog, run_id};
use scope_core::topics::{content_gaps, merge_candidates, parse_candidates};
use scope_plan::{DailyPlan, PhaseResolution, build_daily_plan, resolve_from_inventory};
use serde::Serialize;
use tracing::info;

use crate::output::{OutputMode, fail, pretty_kv, pretty_section, render_mode};

/// Arguments for `scope plan`.
#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// JSON array of candidate topics from the discovery step (`-` for stdin).
    #[arg(long, short)]
    pub candidates: Option<PathBuf>,

    /// Articles to plan. Defaults to `agent.max_articles_per_run`.
    #[arg(long, short)]
    pub budget: Option<usize>,

    /// Add missing core educational topics to the candidates.
    #[arg(long)]
    pub include_gaps: bool,

    /// Write a run log under the logs directory.
    #[arg(long)]
    pub record: bool,
}

#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub phase: PhaseResolution,
    pub candidates_considered: usize,
    pub plan: DailyPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_log: Option<PathBuf>,
}

pub fn run_plan(
    args: &PlanArgs,
    output: OutputMode,
    project_root: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let started = Utc::now();
    let inventory = super::read_inventory(project_root, config);
    let phase = resolve_from_inventory(inventory.as_ref(), &config.phases);

    let mut candidates: Vec<CandidateTopic> = match &args.candidates {
        Some(path) => {
            let raw = super::read_input(path).map_err(|e| {
                fail(
                    output,
                    ErrorCode::CandidatesUnreadable,
                    format!("{}: {e}", path.display()),
                )
            })?;
            parse_candidates(&raw)
        }
        None => Vec::new(),
    };
    if args.include_gaps {
        let gaps = match &inventory {
            Ok(inventory) => content_gaps(inventory),
            Err(_) => scope_core::topics::core_topics(),
        };
        candidates = merge_candidates(candidates, gaps);
    }

    let budget = args.budget.unwrap_or(config.agent.max_articles_per_run);
    let plan = build_daily_plan(&candidates, &phase.phase().content_mix, budget);

    let run_log = if args.record {
        let log = RunLog {
            run_id: run_id(started),
            timestamp: started,
            phase: phase.phase().kind,
            phase_name: phase.phase().name.clone(),
            published_count: phase.published().unwrap_or(0),
            budget,
            slots: plan
                .allocations
                .iter()
                .map(|a| (a.category, a.slots))
                .collect(),
            candidates_considered: candidates.len(),
            articles_planned: plan.len(),
            plan: plan.selected.clone(),
        };
        let path = log
            .write(&config.logs_dir(project_root))
            .map_err(|e| fail(output, ErrorCode::RunLogWriteFailed, e))?;
        Some(path)
    } else {
        None
    };

    info!(
        phase = %phase.phase().kind,
        candidates = candidates.len(),
        planned = plan.len(),
        "plan ready"
    );

    let report = PlanReport {
        phase,
        candidates_considered: candidates.len(),
        plan,
        run_log,
    };
    render_mode(
        output,
        &report,
        |r, w| render_plan_text(r, w),
        |r, w| render_plan_pretty(r, w),
    )
}

fn render_plan_text(report: &PlanReport, w: &mut dyn Write) -> std::io::Result<()> {
    for topic in &report.plan.selected {
        writeln!(w, "{}  {}  {}", topic.priority, topic.url(), topic.title)?;
    }
    Ok(())
}

fn render_plan_pretty(report: &PlanReport, w: &mut dyn Write) -> std::io::Result<()> {
    let phase = report.phase.phase();
    pretty_section(w, &format!("Daily plan: {} phase", phase.name))?;
    if let PhaseResolution::Defaulted { reason, .. } = &report.phase {
        pretty_kv(w, "defaulted", reason)?;
    }
    let slots: Vec<String> = report
        .plan
        .allocations
        .iter()
        .map(|a| format!("{} {}", a.category, a.slots))
        .collect();
    pretty_kv(w, "slots", slots.join(", "))?;
    pretty_kv(w, "candidates", report.candidates_considered.to_string())?;
    if report.plan.unfilled_slots > 0 {
        pretty_kv(w, "unfilled", report.plan.unfilled_slots.to_string())?;
    }
    if let Some(path) = &report.run_log {
        pretty_kv(w, "run log", path.display().to_string())?;
    }
    writeln!(w)?;
    if report.plan.is_empty() {
        return writeln!(w, "Nothing planned.");
    }
    for (idx, topic) in report.plan.selected.iter().enumerate() {
        writeln!(
            w,
            "{:>2}. [{}] {} (priority {})",
            idx + 1,
            topic.category,
            topic.title,
            topic.priority
        )?;
        writeln!(w, "    {}", topic.url())?;
    }
    Ok(())
}
