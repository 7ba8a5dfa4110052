//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for agents, or stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use clap::ValueEnum;
use scope_core::error::ErrorCode;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

pub const PRETTY_RULE_WIDTH: usize = 72;

pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, visual framing).
    Pretty,
    /// Token-efficient plain text for agents and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Core resolution logic, separated from I/O for testability.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if json_flag {
        return OutputMode::Json;
    }

    if let Some(val) = format_env {
        match val.to_lowercase().as_str() {
            "json" => return OutputMode::Json,
            "text" => return OutputMode::Text,
            "pretty" => return OutputMode::Pretty,
            _ => {} // unknown value: fall through to TTY detection
        }
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from CLI flags, environment, and TTY defaults.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(format_flag, json_flag, env_val.as_deref(), is_tty)
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Stable `E####` code from [`ErrorCode`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Error carrying `code`'s identifier and remediation hint.
    pub fn from_code(code: ErrorCode, detail: impl std::fmt::Display) -> Self {
        Self {
            message: format!("{}: {detail}", code.message()),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode, the value is serialized with `serde_json`. In pretty/text mode,
/// the provided `human_fn` closure is called to produce text output.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => human_fn(value, &mut out)?,
    }
    Ok(())
}

/// Render a serializable value with explicit text and pretty renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut out)?,
        OutputMode::Pretty => pretty_fn(value, &mut out)?,
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// Render `code` to stderr and return the error to propagate.
pub fn fail(mode: OutputMode, code: ErrorCode, detail: impl std::fmt::Display) -> anyhow::Error {
    let error = CliError::from_code(code, detail);
    if let Err(e) = render_error(mode, &error) {
        return e;
    }
    anyhow::anyhow!("{}", error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_format_flag_wins_over_json_and_env() {
        let mode = resolve_output_mode_inner(Some(OutputMode::Text), true, Some("pretty"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_json_flag_wins_over_env() {
        let mode = resolve_output_mode_inner(None, true, Some("pretty"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_format_env_case_insensitive() {
        let mode = resolve_output_mode_inner(None, false, Some("JSON"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_format_env_unknown_falls_through_to_tty() {
        let mode_tty = resolve_output_mode_inner(None, false, Some("fancy"), true);
        assert_eq!(mode_tty, OutputMode::Pretty);
        let mode_pipe = resolve_output_mode_inner(None, false, Some("fancy"), false);
        assert_eq!(mode_pipe, OutputMode::Text);
    }

    #[test]
    fn resolve_default_depends_on_tty() {
        assert_eq!(resolve_output_mode_inner(None, false, None, true), OutputMode::Pretty);
        assert_eq!(resolve_output_mode_inner(None, false, None, false), OutputMode::Text);
    }

    #[test]
    fn cli_error_carries_code_and_hint() {
        let err = CliError::from_code(ErrorCode::ContentRootMissing, "content");
        assert_eq!(err.error_code.as_deref(), Some("E2001"));
        assert!(err.message.starts_with("Content root not found"));
        assert!(err.suggestion.is_some());

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error_code"], "E2001");
    }

    #[test]
    fn pretty_helpers_write_expected_shapes() {
        let mut buf = Vec::new();
        pretty_section(&mut buf, "Plan").unwrap();
        pretty_kv(&mut buf, "phase", "Foundation").unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.starts_with("Plan\n"));
        assert!(s.contains(&"-".repeat(PRETTY_RULE_WIDTH)));
        assert!(s.contains("phase:"));
        assert!(s.contains("Foundation"));
    }
}
