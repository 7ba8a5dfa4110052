//! `scope draft`: save a drafted article into the content tree.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use scope_core::config::ProjectConfig;
use scope_core::draft::{ArticleDraft, DraftStore, FsDraftStore};
use scope_core::error::ErrorCode;
use serde::Serialize;

use crate::output::{OutputMode, fail, pretty_kv, render};

/// Arguments for `scope draft`.
#[derive(Args, Debug)]
pub struct DraftArgs {
    /// Draft JSON with category, slug, title and content (`-` for stdin).
    pub file: PathBuf,

    /// Replace an existing article at the same URL.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct Saved {
    path: PathBuf,
    url: String,
}

pub fn run_draft(
    args: &DraftArgs,
    output: OutputMode,
    project_root: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let raw = super::read_input(&args.file).map_err(|e| {
        fail(
            output,
            ErrorCode::DraftUnreadable,
            format!("{}: {e}", args.file.display()),
        )
    })?;
    let draft =
        ArticleDraft::from_json(&raw).map_err(|e| fail(output, ErrorCode::DraftUnreadable, e))?;

    let store = FsDraftStore::new(config.content_root(project_root)).overwrite(args.force);
    let path = store
        .save(&draft)
        .map_err(|e| fail(output, ErrorCode::DraftWriteFailed, e))?;

    let saved = Saved {
        path,
        url: draft.url(),
    };
    render(output, &saved, |s, w| render_saved_human(s, w))
}

fn render_saved_human(saved: &Saved, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_kv(w, "saved", saved.path.display().to_string())?;
    pretty_kv(w, "url", &saved.url)
}
