//! Exports of named subgraphs, triggered by `graph_<query>.<filetype>` mentions.
//!
//! Once a document is fully parsed, each mention is resolved to the first heading (in document
//! order) whose title contains the query. The heading's subtree is projected into a read-only
//! [`ExportView`]: its nodes, the edges entirely inside it, and the edges crossing its boundary
//! together with the outside nodes they reach. The view is rendered and handed to a [`Renderer`].
//! Nothing in the shared graph is touched, so a failed export cannot affect the next one.

use crate::cluster::ClusterId;
use crate::dot::Serializer;
use crate::edges::Edge;
use crate::error::RenderError;
use crate::graph::{Document, Graph};
use crate::line::FilenameMention;
use crate::registry::NodeId;
use crate::render::Renderer;
use indexmap::IndexSet;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Read-only projection of one cluster subtree and its surroundings.
pub struct ExportView {
    /// Cluster at the top of the exported subtree.
    pub cluster: ClusterId,
    /// Nodes owned anywhere in the subtree.
    pub nodes: HashSet<NodeId>,
    /// Edges with both endpoints inside the subtree.
    pub internal: Vec<Edge>,
    /// Edges with exactly one endpoint inside the subtree.
    pub external: Vec<Edge>,
    /// Outside endpoints of the external edges, in order of first appearance.
    pub boundary: Vec<NodeId>,
}

impl ExportView {
    #[must_use]
    /// Project the subtree rooted at `cluster`.
    pub fn project(graph: &Graph, cluster: ClusterId) -> Self {
        let nodes = graph.subtree_nodes(cluster);
        let mut internal = Vec::new();
        let mut external = Vec::new();
        let mut boundary = IndexSet::new();

        for edge in graph.edges().edges_touching(&nodes) {
            if nodes.contains(&edge.parent) && nodes.contains(&edge.child) {
                internal.push(*edge);
            } else {
                boundary.extend(
                    [edge.parent, edge.child]
                        .into_iter()
                        .filter(|node| !nodes.contains(node)),
                );
                external.push(*edge);
            }
        }

        Self {
            cluster,
            nodes,
            internal,
            external,
            boundary: boundary.into_iter().collect(),
        }
    }
}

#[derive(Default)]
/// What happened to each mention of a document.
pub struct ExportReport {
    /// Files the renderer produced.
    pub written: Vec<PathBuf>,
    /// Mentions whose query matched no heading.
    pub unresolved: Vec<FilenameMention>,
    /// Mentions whose renderer call failed.
    pub failed: Vec<(FilenameMention, RenderError)>,
}

impl ExportReport {
    #[must_use]
    /// Whether any export failed to render.
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Resolve and render every mention of `document`, writing files into `output_dir`.
///
/// Each distinct filename is exported once. Unresolved mentions and renderer failures are logged
/// and reported without stopping the remaining exports.
pub fn export_document(
    serializer: &Serializer,
    document: &Document,
    renderer: &dyn Renderer,
    output_dir: &Path,
) -> ExportReport {
    let graph = serializer.graph();
    let mut report = ExportReport::default();
    let mut seen = HashSet::new();

    for mention in &document.mentions {
        if !seen.insert(mention.filename.as_str()) {
            continue;
        }

        let Some(cluster) = graph.find_cluster(document.root, &mention.query) else {
            warn!(
                "{}:{}: no heading contains `{}`, skipping {}",
                document.title, mention.line, mention.query, mention.filename
            );
            report.unresolved.push(mention.clone());
            continue;
        };

        let view = ExportView::project(graph, cluster);
        debug!(
            "Exporting `{}`: {} nodes, {} internal and {} boundary edges",
            graph.cluster(cluster).title,
            view.nodes.len(),
            view.internal.len(),
            view.external.len()
        );
        let payload = serializer.render_export(&view);
        let output = output_dir.join(&mention.filename);

        match renderer.render(&payload, &mention.filetype, &output) {
            Ok(()) => {
                info!("Wrote {}", output.display());
                report.written.push(output);
            }
            Err(e) => {
                error!("Export {} failed: {e}", mention.filename);
                report.failed.push((mention.clone(), e));
            }
        }
    }

    report
}

#[cfg(test)]
#[path = "tests/export.rs"]
mod tests;
