#![forbid(unsafe_code)]
//! scope-links library.
//!
//! # Conventions
//!
//! - **Input**: every operation reads an immutable
//!   [`ContentInventory`](scope_core::inventory::ContentInventory) snapshot.
//!   Only published items take part in suggestions and audits.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod audit;
pub mod graph;
pub mod suggest;

pub use audit::{LinkAudit, audit_links};
pub use graph::LinkGraph;
pub use suggest::{LinkReason, LinkSuggestion, suggest_links};
