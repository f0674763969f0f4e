//! Arena of graph nodes unified by label.
//!
//! The first mention of a label creates its node; every later mention, in any document, resolves
//! to the same handle. Each node remembers the shallowest depth it was defined at and the cluster
//! that definition happened in, which is the cluster that owns (draws) it.

use crate::cluster::ClusterId;
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Handle to a [`Node`] in the [`NodeRegistry`].
pub struct NodeId(pub usize);

#[derive(Clone, Debug)]
/// A uniquely labelled graph vertex.
pub struct Node {
    /// Label text, also the node's identity.
    pub label: String,
    /// Extra display attributes emitted alongside the label.
    pub attributes: BTreeMap<String, String>,
    /// Shallowest depth this label has been defined at, if defined yet.
    pub depth: Option<usize>,
    /// Cluster of the shallowest definition.
    pub owner: Option<ClusterId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Outcome of [`NodeRegistry::claim`], telling the caller how cluster node sets must change.
pub enum Claim {
    /// First definition: the node joins the claiming cluster.
    Created,
    /// Strictly shallower redefinition: the node moves out of `from`.
    Promoted {
        /// Previous owner.
        from: ClusterId,
    },
    /// Equal or deeper redefinition: ownership stays put.
    Unchanged,
}

#[derive(Default)]
/// Append-only node arena with a label lookup.
pub struct NodeRegistry {
    nodes: Vec<Node>,
    by_label: HashMap<String, NodeId>,
}

impl NodeRegistry {
    #[must_use]
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `label`, creating an unowned one on first sight.
    pub fn get_or_create(&mut self, label: &str) -> NodeId {
        if let Some(id) = self.by_label.get(label) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            label: label.to_string(),
            attributes: BTreeMap::new(),
            depth: None,
            owner: None,
        });
        self.by_label.insert(label.to_string(), id);
        id
    }

    #[must_use]
    /// Look up an existing node by label.
    pub fn lookup(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    #[must_use]
    /// Borrow a node. Handles are only minted by this registry, so they are always valid.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Set a display attribute on a node.
    pub fn set_attribute(&mut self, id: NodeId, key: &str, value: &str) {
        self.nodes[id.0]
            .attributes
            .insert(key.to_string(), value.to_string());
    }

    /// Record a definition of `id` at `depth` inside `cluster`.
    ///
    /// Ownership only ever moves to a strictly shallower definition site.
    pub fn claim(&mut self, id: NodeId, depth: usize, cluster: ClusterId) -> Claim {
        let node = &mut self.nodes[id.0];
        match (node.depth, node.owner) {
            (Some(owned_depth), Some(from)) if depth < owned_depth => {
                node.depth = Some(depth);
                node.owner = Some(cluster);
                Claim::Promoted { from }
            }
            (Some(_), Some(_)) => Claim::Unchanged,
            _ => {
                node.depth = Some(depth);
                node.owner = Some(cluster);
                Claim::Created
            }
        }
    }

    #[must_use]
    /// Number of nodes ever created.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// Whether no node has been created yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes with their handles, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }
}

#[cfg(test)]
#[path = "tests/registry.rs"]
mod tests;
