//! Graph construction from a content inventory.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "published page A links to published page B".
//!
//! ## What Becomes an Edge
//!
//! - Only published items are nodes. Links to drafts, rejected items or
//!   URLs the inventory does not know are dropped.
//! - A page linking to itself contributes nothing.
//! - A page linking to the same target several times contributes one edge.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use scope_core::inventory::ContentInventory;
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// LinkGraph
// ---------------------------------------------------------------------------

/// Directed link graph between published pages.
///
/// Node weights are page URLs. Node indices follow inventory discovery
/// order, so iterating [`LinkGraph::urls`] is deterministic.
#[derive(Debug)]
pub struct LinkGraph {
    pub graph: DiGraph<String, ()>,
    pub node_map: HashMap<String, NodeIndex>,
    /// BLAKE3 hash of the sorted edge list.
    pub content_hash: String,
}

impl LinkGraph {
    #[instrument(skip_all, fields(items = inventory.len()))]
    #[must_use]
    pub fn from_inventory(inventory: &ContentInventory) -> Self {
        let mut graph = DiGraph::<String, ()>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        for item in inventory.published() {
            let url = item.url();
            let idx = graph.add_node(url.clone());
            node_map.insert(url, idx);
        }

        let mut edges: Vec<(String, String)> = Vec::new();
        for item in inventory.published() {
            let source_url = item.url();
            let Some(&source) = node_map.get(&source_url) else {
                continue;
            };
            for target_url in &item.outbound_links {
                if *target_url == source_url {
                    continue;
                }
                let Some(&target) = node_map.get(target_url) else {
                    continue;
                };
                if !graph.contains_edge(source, target) {
                    graph.add_edge(source, target, ());
                    edges.push((source_url.clone(), target_url.clone()));
                }
            }
        }

        edges.sort();
        let content_hash = compute_edge_hash(&edges);
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "link graph built"
        );

        Self {
            graph,
            node_map,
            content_hash,
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn node_index(&self, url: &str) -> Option<NodeIndex> {
        self.node_map.get(url).copied()
    }

    /// Page URLs in discovery order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }

    /// Number of distinct published pages linking to `url`.
    #[must_use]
    pub fn inbound_count(&self, url: &str) -> usize {
        self.node_index(url).map_or(0, |idx| {
            self.graph
                .neighbors_directed(idx, Direction::Incoming)
                .count()
        })
    }
}

fn compute_edge_hash(edges: &[(String, String)]) -> String {
    let mut hasher = blake3::Hasher::new();
    for (source, target) in edges {
        hasher.update(source.as_bytes());
        hasher.update(b"\x00");
        hasher.update(target.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
