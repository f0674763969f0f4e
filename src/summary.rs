//! Serialisable snapshot of one document's graph, for `--json` output and external tooling.

use crate::cluster::ClusterId;
use crate::graph::Graph;
use serde::Serialize;

#[derive(Serialize, Debug, PartialEq)]
/// Clusters and edges reachable from one document root.
pub struct DocumentSummary {
    /// Document title.
    pub title: String,
    /// Clusters in document order, the root first.
    pub clusters: Vec<ClusterSummary>,
    /// Edges drawn inside this document's clusters, as label pairs.
    pub edges: Vec<EdgeSummary>,
}

#[derive(Serialize, Debug, PartialEq)]
/// One cluster and the labels of the nodes it owns.
pub struct ClusterSummary {
    /// Heading text (document title for the root).
    pub title: String,
    /// Heading level, 0 for the root.
    pub level: usize,
    /// Title of the enclosing cluster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Labels of owned nodes.
    pub nodes: Vec<String>,
}

#[derive(Serialize, Debug, PartialEq)]
/// A directed edge by label.
pub struct EdgeSummary {
    /// Tail label.
    pub from: String,
    /// Head label.
    pub to: String,
}

#[must_use]
/// Summarise the clusters under `root` and the edges drawn in them.
pub fn summarize(graph: &Graph, root: ClusterId) -> DocumentSummary {
    let order = graph.descendants(root);
    let label = |id| graph.nodes().get(id).label.clone();

    let clusters = order
        .iter()
        .map(|id| {
            let cluster = graph.cluster(*id);
            ClusterSummary {
                title: cluster.title.clone(),
                level: cluster.level,
                parent: cluster
                    .parent_index
                    .map(|parent| graph.cluster(parent).title.clone()),
                nodes: cluster.nodes.iter().map(|node| label(*node)).collect(),
            }
        })
        .collect();

    let edges = order
        .iter()
        .flat_map(|id| graph.edges().tagged(*id))
        .map(|edge| EdgeSummary {
            from: label(edge.parent),
            to: label(edge.child),
        })
        .collect();

    DocumentSummary {
        title: graph.cluster(root).title.clone(),
        clusters,
        edges,
    }
}

#[cfg(test)]
#[path = "tests/summary.rs"]
mod tests;
