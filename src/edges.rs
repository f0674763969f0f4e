//! Deduplicated store of directed parent → child relationships.

use crate::cluster::ClusterId;
use crate::registry::NodeId;
use indexmap::IndexMap;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A directed edge between two nodes.
pub struct Edge {
    /// Tail of the arrow.
    pub parent: NodeId,
    /// Head of the arrow.
    pub child: NodeId,
    /// Cluster that was current when the edge was first seen, which is where it is drawn.
    pub cluster: ClusterId,
}

#[derive(Default)]
/// Insertion-ordered edge set keyed by `(parent, child)`.
pub struct EdgeIndex {
    edges: IndexMap<(NodeId, NodeId), Edge>,
}

impl EdgeIndex {
    #[must_use]
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge, returning `false` if the pair was already present.
    ///
    /// Re-adding a pair keeps the original cluster tag.
    pub fn add(&mut self, parent: NodeId, child: NodeId, cluster: ClusterId) -> bool {
        if self.edges.contains_key(&(parent, child)) {
            return false;
        }
        self.edges.insert(
            (parent, child),
            Edge {
                parent,
                child,
                cluster,
            },
        );
        true
    }

    #[must_use]
    /// Whether the directed pair is present.
    pub fn contains(&self, parent: NodeId, child: NodeId) -> bool {
        self.edges.contains_key(&(parent, child))
    }

    /// Every edge with at least one endpoint in `nodes`, in insertion order.
    pub fn edges_touching<'a>(
        &'a self,
        nodes: &'a HashSet<NodeId>,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges
            .values()
            .filter(move |edge| nodes.contains(&edge.parent) || nodes.contains(&edge.child))
    }

    /// Every edge drawn in `cluster`, in insertion order.
    pub fn tagged(&self, cluster: ClusterId) -> impl Iterator<Item = &Edge> {
        self.edges
            .values()
            .filter(move |edge| edge.cluster == cluster)
    }

    /// All edges in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    #[must_use]
    /// Number of distinct edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    /// Whether no edge has been added.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/edges.rs"]
mod tests;
