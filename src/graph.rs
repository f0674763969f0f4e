//! The outline-to-graph builder.
//!
//! A [`Graph`] accumulates every document it is fed: node identity is shared across documents,
//! while each document gets its own root cluster. Lines are processed strictly in order. Headings
//! open clusters resolved against the heading history, items become nodes resolved against the
//! node history, and the node history is cleared at every heading so item parenthood never
//! crosses a heading boundary.

use crate::ancestry::History;
use crate::cluster::{Cluster, ClusterId};
use crate::edges::EdgeIndex;
use crate::error::{Error, Result};
use crate::line::{self, FilenameMention, LineKind};
use crate::registry::{Claim, NodeId, NodeRegistry};
use log::debug;
use std::collections::HashSet;

#[derive(Debug)]
/// One parsed input document.
pub struct Document {
    /// Title used for the root cluster.
    pub title: String,
    /// Root cluster of this document.
    pub root: ClusterId,
    /// Export requests found anywhere in the document, in line order.
    pub mentions: Vec<FilenameMention>,
}

#[derive(Default)]
/// Process-wide graph state: node arena, cluster arena and edge index.
pub struct Graph {
    nodes: NodeRegistry,
    clusters: Vec<Cluster>,
    edges: EdgeIndex,
}

impl Graph {
    #[must_use]
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// The node arena.
    pub fn nodes(&self) -> &NodeRegistry {
        &self.nodes
    }

    #[must_use]
    /// The edge index.
    pub fn edges(&self) -> &EdgeIndex {
        &self.edges
    }

    #[must_use]
    /// Borrow a cluster. Handles are only minted by this graph, so they are always valid.
    pub fn cluster(&self, id: ClusterId) -> &Cluster {
        &self.clusters[id.0]
    }

    /// Iterate over all clusters with their handles, in creation order.
    pub fn clusters(&self) -> impl Iterator<Item = (ClusterId, &Cluster)> {
        self.clusters
            .iter()
            .enumerate()
            .map(|(index, cluster)| (ClusterId(index), cluster))
    }

    /// Set a display attribute on a cluster.
    pub fn set_cluster_attribute(&mut self, id: ClusterId, key: &str, value: &str) {
        self.clusters[id.0]
            .attributes
            .insert(key.to_string(), value.to_string());
    }

    /// Set a display attribute on a node.
    pub fn set_node_attribute(&mut self, id: NodeId, key: &str, value: &str) {
        self.nodes.set_attribute(id, key, value);
    }

    /// Parse one document into the graph.
    ///
    /// The document is checked for node references without context before anything is added, so
    /// a failing document leaves the graph untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAncestorContext`] if an inline `|Label|` reference appears in a
    /// heading scope before any item has been defined in it.
    pub fn parse_document(&mut self, title: &str, text: &str) -> Result<Document> {
        check_references(text)?;

        let root = self.add_cluster(Cluster::root(title));
        let mut current = root;
        let mut node_history: History<NodeId> = History::new();
        let mut heading_history: History<ClusterId> = History::new();
        let mut mentions = Vec::new();

        for (index, text) in text.lines().enumerate() {
            let number = index + 1;
            mentions.extend(line::filename_mentions(text, number));

            let record = line::classify(text, number);
            if let Some(record) = record.as_ref().filter(|r| r.kind == LineKind::Heading) {
                let parent = heading_history
                    .find_parent(record)
                    .map_or(root, |(_, cluster)| *cluster);
                current = self.add_cluster(Cluster::heading(
                    &record.label,
                    record.depth,
                    number,
                    Some(parent),
                ));
                heading_history.push(record.clone(), current);
                node_history.clear();
                continue;
            }

            if let Some(record) = record {
                let node = self.nodes.get_or_create(&record.label);
                self.record_definition(node, record.depth, current);
                if let Some((_, parent)) = node_history.find_parent(&record) {
                    self.edges.add(*parent, node, current);
                }
                node_history.push(record, node);
            }

            for label in line::node_references(text) {
                // Checked above: every reference has a node in scope.
                let Some((anchor_record, anchor)) = node_history.latest() else {
                    continue;
                };
                let target = self.nodes.get_or_create(&label);
                self.record_definition(target, anchor_record.depth + 1, current);
                self.edges.add(*anchor, target, current);
            }
        }

        Ok(Document {
            title: title.to_string(),
            root,
            mentions,
        })
    }

    /// Record a definition of `node` at `depth` under `cluster`, moving it between cluster node
    /// sets if this is its shallowest definition so far.
    pub fn record_definition(&mut self, node: NodeId, depth: usize, cluster: ClusterId) {
        match self.nodes.claim(node, depth, cluster) {
            Claim::Created => {
                self.clusters[cluster.0].nodes.insert(node);
            }
            Claim::Promoted { from } => {
                debug!(
                    "Node `{}` promoted from `{}` to `{}` (depth {depth})",
                    self.nodes.get(node).label,
                    self.clusters[from.0].title,
                    self.clusters[cluster.0].title,
                );
                self.clusters[from.0].nodes.shift_remove(&node);
                self.clusters[cluster.0].nodes.insert(node);
            }
            Claim::Unchanged => {}
        }
    }

    #[must_use]
    /// `root` followed by all of its descendants, in document order.
    pub fn descendants(&self, root: ClusterId) -> Vec<ClusterId> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.clusters[id.0].children_indices.iter().rev().copied());
        }
        order
    }

    #[must_use]
    /// Union of the node sets of `root` and all of its descendants.
    pub fn subtree_nodes(&self, root: ClusterId) -> HashSet<NodeId> {
        self.descendants(root)
            .into_iter()
            .flat_map(|id| self.clusters[id.0].nodes.iter().copied())
            .collect()
    }

    #[must_use]
    /// The first heading cluster under `root`, in document order, whose title contains `query`.
    pub fn find_cluster(&self, root: ClusterId, query: &str) -> Option<ClusterId> {
        self.descendants(root)
            .into_iter()
            .skip(1)
            .find(|id| self.clusters[id.0].title.contains(query))
    }

    fn add_cluster(&mut self, cluster: Cluster) -> ClusterId {
        let id = ClusterId(self.clusters.len());
        if let Some(parent) = cluster.parent_index {
            self.clusters[parent.0].children_indices.push(id);
            debug!(
                "Cluster `{}` (level {}) nested under `{}`",
                cluster.title, cluster.level, self.clusters[parent.0].title
            );
        }
        self.clusters.push(cluster);
        id
    }
}

/// Reject documents where a node reference has no item before it in its heading scope.
fn check_references(text: &str) -> Result<()> {
    let mut in_scope = false;
    for (index, text) in text.lines().enumerate() {
        match line::classify(text, index + 1).map(|record| record.kind) {
            Some(LineKind::Heading) => {
                in_scope = false;
                continue;
            }
            Some(kind) if kind.defines_node() => in_scope = true,
            _ => {}
        }
        if !in_scope {
            if let Some(label) = line::node_references(text).into_iter().next() {
                return Err(Error::MissingAncestorContext {
                    line: index + 1,
                    label,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/graph.rs"]
mod tests;
