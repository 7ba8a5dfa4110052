//! `scope inventory`: list content items or summarize counts.

use std::io::Write;
use std::path::Path;

use clap::Args;
use scope_core::config::ProjectConfig;
use scope_core::error::ErrorCode;
use scope_core::inventory::InventoryStats;
use scope_core::model::{Category, ContentItem, Status};
use serde::Serialize;

use crate::output::{OutputMode, fail, pretty_kv, pretty_section, render, render_mode};

/// Arguments for `scope inventory`.
#[derive(Args, Debug, Default)]
pub struct InventoryArgs {
    /// Only items in this category.
    #[arg(long)]
    pub category: Option<Category>,

    /// Only items with this status.
    #[arg(long)]
    pub status: Option<Status>,

    /// Print per-category counts instead of items.
    #[arg(long)]
    pub stats: bool,
}

#[derive(Debug, Serialize)]
struct ItemRow<'a> {
    url: String,
    #[serde(flatten)]
    item: &'a ContentItem,
}

pub fn run_inventory(
    args: &InventoryArgs,
    output: OutputMode,
    project_root: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let inventory = super::read_inventory(project_root, config)
        .map_err(|e| fail(output, ErrorCode::ContentRootMissing, e))?;

    if args.stats {
        let stats = inventory.stats();
        return render(output, &stats, |stats, w| render_stats_human(stats, w));
    }

    let rows: Vec<ItemRow<'_>> = inventory
        .items()
        .iter()
        .filter(|item| args.category.is_none_or(|c| item.category == c))
        .filter(|item| args.status.is_none_or(|s| item.status == s))
        .map(|item| ItemRow {
            url: item.url(),
            item,
        })
        .collect();

    render_mode(
        output,
        &rows,
        |rows, w| render_rows_text(rows, w),
        |rows, w| render_rows_pretty(rows, w),
    )
}

fn render_rows_text(rows: &[ItemRow<'_>], w: &mut dyn Write) -> std::io::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    writeln!(w, "URL  STATUS  WORDS  LINKS  TITLE")?;
    for row in rows {
        writeln!(
            w,
            "{}  {}  {}  {}  {}",
            row.url,
            row.item.status,
            row.item.word_count,
            row.item.outbound_links.len(),
            row.item.title
        )?;
    }
    Ok(())
}

fn render_rows_pretty(rows: &[ItemRow<'_>], w: &mut dyn Write) -> std::io::Result<()> {
    if rows.is_empty() {
        return writeln!(w, "No content items.");
    }
    pretty_section(w, &format!("Content ({})", rows.len()))?;
    for row in rows {
        writeln!(w, "{:<10} {}", format!("[{}]", row.item.status), row.url)?;
        writeln!(w, "           {}", row.item.title)?;
        if !row.item.target_keywords.is_empty() {
            let keywords: Vec<&str> = row.item.target_keywords.iter().collect();
            writeln!(w, "           keywords: {}", keywords.join(", "))?;
        }
    }
    Ok(())
}

fn render_stats_human(stats: &InventoryStats, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Inventory")?;
    pretty_kv(w, "total", stats.total.to_string())?;
    pretty_kv(w, "published", stats.published.to_string())?;
    for (category, counts) in &stats.by_category {
        pretty_kv(
            w,
            category.as_str(),
            format!("{} items, {} published", counts.total, counts.published),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scope_core::inventory::ContentInventory;
    use scope_core::model::KeywordSet;

    fn item(slug: &str, status: Status) -> ContentItem {
        ContentItem {
            slug: slug.to_string(),
            category: Category::Learn,
            title: format!("Title {slug}"),
            status,
            target_keywords: ["odds"].into_iter().collect::<KeywordSet>(),
            outbound_links: vec!["/learn/x".to_string()],
            word_count: 42,
        }
    }

    #[test]
    fn text_rows_are_space_separated() {
        let a = item("a", Status::Published);
        let rows = vec![ItemRow {
            url: a.url(),
            item: &a,
        }];
        let mut buf = Vec::new();
        render_rows_text(&rows, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.starts_with("URL  STATUS"));
        assert!(s.contains("/learn/a  published  42  1  Title a"));
    }

    #[test]
    fn row_json_flattens_item_fields() {
        let a = item("a", Status::Draft);
        let row = ItemRow {
            url: a.url(),
            item: &a,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["url"], "/learn/a");
        assert_eq!(json["status"], "draft");
        assert_eq!(json["target_keywords"][0], "odds");
    }

    #[test]
    fn stats_render_lists_each_category() {
        let inventory = ContentInventory::from_items([item("a", Status::Published)]);
        let mut buf = Vec::new();
        render_stats_human(&inventory.stats(), &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("learn:"));
        assert!(s.contains("1 items, 1 published"));
        assert!(s.contains("best:"));
    }
}
