//! Link-graph audit: orphaned and under-linked published pages.

use serde::Serialize;
use tracing::info;

use scope_core::config::LinkingConfig;
use scope_core::inventory::ContentInventory;

use crate::graph::LinkGraph;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InboundCount {
    pub url: String,
    pub inbound: usize,
}

/// Result of auditing the published link graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkAudit {
    /// Number of published pages.
    pub total_pages: usize,
    /// Published pages no other published page links to.
    pub orphan_pages: Vec<String>,
    /// Pages with at least one but fewer than `under_linked_below` inbound links.
    pub under_linked_pages: Vec<String>,
    /// Mean inbound count over published pages; 0 when there are none.
    pub average_inbound_links: f64,
    /// Per-page inbound counts, in discovery order.
    pub inbound_counts: Vec<InboundCount>,
    pub edge_count: usize,
    pub graph_hash: String,
}

/// Audit the published pages of `inventory`.
#[must_use]
pub fn audit_links(inventory: &ContentInventory, config: &LinkingConfig) -> LinkAudit {
    let graph = LinkGraph::from_inventory(inventory);
    let audit = audit_graph(&graph, config.under_linked_below);
    info!(
        pages = audit.total_pages,
        orphans = audit.orphan_pages.len(),
        under_linked = audit.under_linked_pages.len(),
        hash = %audit.graph_hash,
        "link audit complete"
    );
    audit
}

/// Audit an already-built graph.
#[must_use]
pub fn audit_graph(graph: &LinkGraph, under_linked_below: usize) -> LinkAudit {
    let inbound_counts: Vec<InboundCount> = graph
        .urls()
        .map(|url| InboundCount {
            url: url.to_string(),
            inbound: graph.inbound_count(url),
        })
        .collect();

    let orphan_pages = inbound_counts
        .iter()
        .filter(|c| c.inbound == 0)
        .map(|c| c.url.clone())
        .collect();
    let under_linked_pages = inbound_counts
        .iter()
        .filter(|c| c.inbound > 0 && c.inbound < under_linked_below)
        .map(|c| c.url.clone())
        .collect();

    let total_pages = inbound_counts.len();
    let total_inbound: usize = inbound_counts.iter().map(|c| c.inbound).sum();

    LinkAudit {
        total_pages,
        orphan_pages,
        under_linked_pages,
        average_inbound_links: mean(total_inbound, total_pages),
        inbound_counts,
        edge_count: graph.edge_count(),
        graph_hash: graph.content_hash.clone(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(sum: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    sum as f64 / count as f64
}
