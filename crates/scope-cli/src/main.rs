#![forbid(unsafe_code)]

mod cmd;
mod output;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, fail, resolve_output_mode};
use scope_core::config::{ConfigError, load_project_config};
use scope_core::error::ErrorCode;
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "scope",
    author,
    version,
    about = "scope: content strategy for a niche publishing site",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides `--json` and the FORMAT env var).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Project root holding `.scope/config.toml`. Defaults to the current directory.
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List content items",
        long_about = "List every article under the content root with its status, word count and outbound links.",
        after_help = "EXAMPLES:\n    # List everything\n    scope inventory\n\n    # Only published learn pages\n    scope inventory --category learn --status published\n\n    # Per-category counts\n    scope inventory --stats --json"
    )]
    Inventory(cmd::inventory::InventoryArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show the active growth phase",
        long_about = "Count published articles and report which growth phase and content mix apply.",
        after_help = "EXAMPLES:\n    # Current phase\n    scope phase\n\n    # Emit machine-readable output\n    scope phase --json"
    )]
    Phase(cmd::phase::PhaseArgs),

    #[command(
        next_help_heading = "Planning",
        about = "Plan today's articles",
        long_about = "Split the article budget across categories by the phase's content mix and pick the highest-priority candidates.",
        after_help = "EXAMPLES:\n    # Plan from a discovery file\n    scope plan --candidates topics.json\n\n    # Fill with missing core topics and record a run log\n    scope plan --candidates topics.json --include-gaps --record\n\n    # Read candidates from stdin\n    cat topics.json | scope plan --candidates - --json"
    )]
    Plan(cmd::plan::PlanArgs),

    #[command(
        next_help_heading = "Planning",
        about = "List uncovered core topics",
        long_about = "List the core educational topics that have no article yet, highest priority first.",
        after_help = "EXAMPLES:\n    # All gaps\n    scope gaps\n\n    # Top three\n    scope gaps --limit 3 --json"
    )]
    Gaps(cmd::gaps::GapsArgs),

    #[command(next_help_heading = "Links", about = "Suggest and audit internal links")]
    Links {
        #[command(subcommand)]
        command: cmd::links::LinksCommand,
    },

    #[command(
        next_help_heading = "Write",
        about = "Save a drafted article",
        long_about = "Write a drafted article as markdown with YAML frontmatter under <content_root>/<category>/<slug>.md.",
        after_help = "EXAMPLES:\n    # Save a draft\n    scope draft draft.json\n\n    # Replace an existing article\n    scope draft draft.json --force"
    )]
    Draft(cmd::draft::DraftArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    scope completions bash\n\n    # Generate zsh completions\n    scope completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SCOPE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "scope=debug,info"
        } else {
            "scope=info,warn"
        })
    });

    let format = env::var("SCOPE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output; logs stay on stderr.
    match format.as_str() {
        "json" => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_ansi(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

const fn config_error_code(err: &ConfigError) -> ErrorCode {
    match err {
        ConfigError::Invalid { .. } => ErrorCode::ConfigInvalid,
        ConfigError::Read { .. } | ConfigError::Parse { .. } => ErrorCode::ConfigParseError,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();

    if let Commands::Completions(ref args) = cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args, &mut command);
    }

    let project_root = match cli.root.clone() {
        Some(root) => root,
        None => env::current_dir().context("failed to resolve the current directory")?,
    };
    let config = load_project_config(&project_root)
        .map_err(|e| fail(output, config_error_code(&e), &e))?;
    debug!(root = %project_root.display(), "project config loaded");

    match cli.command {
        Commands::Inventory(ref args) => {
            cmd::inventory::run_inventory(args, output, &project_root, &config)
        }
        Commands::Phase(ref args) => cmd::phase::run_phase(args, output, &project_root, &config),
        Commands::Plan(ref args) => cmd::plan::run_plan(args, output, &project_root, &config),
        Commands::Gaps(ref args) => cmd::gaps::run_gaps(args, output, &project_root, &config),
        Commands::Links { ref command } => {
            cmd::links::run_links(command, output, &project_root, &config)
        }
        Commands::Draft(ref args) => cmd::draft::run_draft(args, output, &project_root, &config),
        Commands::Completions(_) => Ok(()),
    }
}
