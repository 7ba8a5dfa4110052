//! `scope links`: internal link suggestions and the site-wide link audit.

use std::io::Write;
use std::path::Path;

use clap::{Args, Subcommand};
use scope_core::config::ProjectConfig;
use scope_core::model::{Category, KeywordSet};
use scope_links::{LinkAudit, LinkReason, LinkSuggestion, audit_links, suggest_links};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Subcommand, Debug)]
pub enum LinksCommand {
    /// Suggest links for a new article.
    ///
    /// Core pages come first, then published pages sharing a keyword,
    /// then cross-category picks for market articles.
    Suggest(SuggestArgs),

    /// Report orphan and under-linked pages.
    Audit(AuditArgs),
}

/// Arguments for `scope links suggest`.
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Category of the article being written.
    pub category: Category,

    /// Target keywords (repeatable or comma-separated).
    #[arg(long = "keyword", short = 'k', value_delimiter = ',')]
    pub keywords: Vec<String>,
}

/// Arguments for `scope links audit`.
#[derive(Args, Debug, Default)]
pub struct AuditArgs {}

pub fn run_links(
    command: &LinksCommand,
    output: OutputMode,
    project_root: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let inventory = super::read_inventory_or_empty(project_root, config);
    match command {
        LinksCommand::Suggest(args) => {
            let keywords: KeywordSet = args.keywords.iter().collect();
            let suggestions = suggest_links(&inventory, args.category, &keywords, &config.linking);
            render_mode(
                output,
                &suggestions,
                |s, w| render_suggestions_text(s, w),
                |s, w| render_suggestions_pretty(s, w),
            )
        }
        LinksCommand::Audit(_) => {
            let audit = audit_links(&inventory, &config.linking);
            render_mode(
                output,
                &audit,
                |a, w| render_audit_text(a, w),
                |a, w| render_audit_pretty(a, w),
            )
        }
    }
}

fn render_suggestions_text(list: &[LinkSuggestion], w: &mut dyn Write) -> std::io::Result<()> {
    for s in list {
        writeln!(w, "{}  {}  {}", s.target_url, s.reason.as_str(), s.title)?;
    }
    Ok(())
}

fn render_suggestions_pretty(list: &[LinkSuggestion], w: &mut dyn Write) -> std::io::Result<()> {
    if list.is_empty() {
        return writeln!(w, "No link suggestions.");
    }
    pretty_section(w, &format!("Suggested links ({})", list.len()))?;
    for s in list {
        writeln!(w, "[{}] {}", s.title, s.target_url)?;
        match &s.reason {
            LinkReason::KeywordOverlap { keywords } => {
                let shared: Vec<&str> = keywords.iter().map(String::as_str).collect();
                writeln!(w, "    why: shares {}", shared.join(", "))?;
            }
            reason => writeln!(w, "    why: {}", reason.as_str())?,
        }
    }
    Ok(())
}

fn render_audit_text(audit: &LinkAudit, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "pages {}  edges {}  avg_inbound {:.2}",
        audit.total_pages, audit.edge_count, audit.average_inbound_links
    )?;
    for url in &audit.orphan_pages {
        writeln!(w, "orphan  {url}")?;
    }
    for url in &audit.under_linked_pages {
        writeln!(w, "under_linked  {url}")?;
    }
    Ok(())
}

fn render_audit_pretty(audit: &LinkAudit, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Link audit")?;
    pretty_kv(w, "pages", audit.total_pages.to_string())?;
    pretty_kv(w, "links", audit.edge_count.to_string())?;
    pretty_kv(w, "avg inbound", format!("{:.2}", audit.average_inbound_links))?;
    pretty_kv(w, "graph", &audit.graph_hash)?;
    if !audit.orphan_pages.is_empty() {
        writeln!(w)?;
        pretty_section(w, &format!("Orphans ({})", audit.orphan_pages.len()))?;
        for url in &audit.orphan_pages {
            writeln!(w, "  {url}")?;
        }
    }
    if !audit.under_linked_pages.is_empty() {
        writeln!(w)?;
        pretty_section(
            w,
            &format!("Under-linked ({})", audit.under_linked_pages.len()),
        )?;
        for url in &audit.under_linked_pages {
            writeln!(w, "  {url}")?;
        }
    }
    Ok(())
}
