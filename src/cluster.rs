//! Cluster representation for heading scopes.
//!
//! A cluster is the graph counterpart of a section: the document root or one heading, together
//! with the nodes whose shallowest definition happened directly under it. Clusters live in an
//! arena and refer to their parent and children by index.

use crate::registry::NodeId;
use indexmap::IndexSet;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Handle to a [`Cluster`] in the graph's cluster arena.
pub struct ClusterId(pub usize);

#[derive(Clone, Debug)]
/// Named nested scope grouping the nodes defined under one heading.
pub struct Cluster {
    /// Heading text, or the document title for a root.
    pub title: String,
    /// Heading level (0 for a document root).
    pub level: usize,
    /// Line of the heading (0 for a document root).
    pub line: usize,
    /// Index of the enclosing cluster, `None` for a document root.
    pub parent_index: Option<ClusterId>,
    /// Indices of directly nested clusters, in document order.
    pub children_indices: Vec<ClusterId>,
    /// Nodes owned by this cluster, in order of arrival.
    pub nodes: IndexSet<NodeId>,
    /// Extra display attributes emitted after the label.
    pub attributes: BTreeMap<String, String>,
}

impl Cluster {
    #[must_use]
    /// A document root cluster.
    pub fn root(title: &str) -> Self {
        Self::heading(title, 0, 0, None)
    }

    #[must_use]
    /// A cluster for a heading at `level` on `line`, nested under `parent`.
    pub fn heading(title: &str, level: usize, line: usize, parent: Option<ClusterId>) -> Self {
        Self {
            title: title.to_string(),
            level,
            line,
            parent_index: parent,
            children_indices: Vec::new(),
            nodes: IndexSet::new(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    /// Whether this is a document root.
    pub fn is_root(&self) -> bool {
        self.parent_index.is_none()
    }
}
