//! Markdown helpers: YAML frontmatter splitting and internal link extraction.

use pulldown_cmark::{Event, Parser, Tag};
use serde::Deserialize;

/// Metadata keys the inventory reads from frontmatter. Unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub status: Option<String>,
    pub target_keywords: Option<Vec<String>>,
    pub word_count: Option<u64>,
}

/// Split a document into its raw frontmatter block and body.
///
/// Frontmatter is recognised only when the first line is `---` and a later
/// line closes it with `---`. Anything else is all body.
#[must_use]
pub fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    let Some(rest) = text
        .strip_prefix("---\r\n")
        .or_else(|| text.strip_prefix("---\n"))
    else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, text)
}

/// Parse a frontmatter block. An empty block yields default metadata.
///
/// # Errors
///
/// Returns the YAML error when the block is not a mapping of the expected
/// shape.
pub fn parse_frontmatter(yaml: &str) -> Result<Frontmatter, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(yaml)
}

/// Site-internal link targets (those starting with `/`) in document order.
///
/// Images are not links. Targets are returned verbatim and not validated.
#[must_use]
pub fn internal_links(body: &str) -> Vec<String> {
    Parser::new(body)
        .filter_map(|event| match event {
            Event::Start(Tag::Link { dest_url, .. }) if dest_url.starts_with('/') => {
                Some(dest_url.into_string())
            }
            _ => None,
        })
        .collect()
}

/// Whitespace-delimited token count.
#[must_use]
pub fn word_count(body: &str) -> u64 {
    body.split_whitespace().count() as u64
}
