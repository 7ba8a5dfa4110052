//! Internal link graph over published content.
//!
//! ## Pipeline
//!
//! ```text
//! ContentInventory (published items, outbound links)
//!        ↓  build::LinkGraph::from_inventory()
//! LinkGraph (DiGraph, one edge per distinct source → target)
//!        ↓  audit::audit_links()
//! LinkAudit (orphans, under-linked pages, inbound counts)
//! ```
//!
//! [`LinkGraph::content_hash`] is a BLAKE3 hash of the edge set. Two audits
//! with the same hash saw the same link structure.

pub mod build;

pub use build::LinkGraph;
