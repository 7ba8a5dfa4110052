//! Domain types shared by every scope crate.

pub mod item;
pub mod phase;
pub mod topic;

pub use item::{Category, ContentItem, KeywordSet, ParseEnumError, Status, content_url, is_valid_slug};
pub use phase::{ContentMix, MixError, Phase, PhaseKind};
pub use topic::CandidateTopic;
