//! Graphviz DOT serialisation of clusters.
//!
//! A cluster renders as its keyword line, label, extra attributes, owned nodes, owned edges and
//! then each child cluster, recursively. A document root is a `digraph`; every other cluster is a
//! `subgraph cluster_<n>` so Graphviz draws a box around it. Any cluster can also be rendered
//! standalone, which is how exports draw an interior heading on its own.
//!
//! Node ids are `n<index>` into the shared registry. A top-level graph also declares edge
//! endpoints owned outside it, since the registry spans every parsed document.

use crate::cluster::ClusterId;
use crate::edges::Edge;
use crate::export::ExportView;
use crate::graph::Graph;
use crate::registry::NodeId;
use indexmap::IndexSet;
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

/// Default label wrap width in characters.
pub const DEFAULT_WRAP_WIDTH: usize = 30;

const INDENT: &str = "    ";

/// Renders clusters of a [`Graph`] as DOT text.
pub struct Serializer<'g> {
    graph: &'g Graph,
    wrap_width: usize,
    graph_attributes: BTreeMap<String, String>,
}

impl<'g> Serializer<'g> {
    #[must_use]
    /// A serialiser wrapping labels at `wrap_width` characters (0 disables wrapping).
    pub fn new(graph: &'g Graph, wrap_width: usize) -> Self {
        Self {
            graph,
            wrap_width,
            graph_attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    /// Add an attribute emitted only on top-level graphs, such as `rankdir`.
    pub fn with_graph_attribute(mut self, key: &str, value: &str) -> Self {
        self.graph_attributes
            .insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    /// The graph being serialised.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    #[must_use]
    /// Render a cluster in place: a `digraph` for a root, a `subgraph` otherwise.
    pub fn render(&self, id: ClusterId) -> String {
        let top_level = self.graph.cluster(id).is_root();
        let mut out = String::new();
        self.write_cluster(&mut out, id, top_level, 0, &|_| true);
        out
    }

    #[must_use]
    /// Render a cluster as a complete `digraph`, even if it is nested.
    pub fn render_standalone(&self, id: ClusterId) -> String {
        let mut out = String::new();
        self.write_cluster(&mut out, id, true, 0, &|_| true);
        out
    }

    #[must_use]
    /// Render an export projection: the subtree standalone with only its internal edges, plus a
    /// dashed boundary region holding outside nodes and the edges that cross into the subtree.
    pub fn render_export(&self, view: &ExportView) -> String {
        let internal: HashSet<(NodeId, NodeId)> = view
            .internal
            .iter()
            .map(|edge| (edge.parent, edge.child))
            .collect();
        let keep = |edge: &Edge| internal.contains(&(edge.parent, edge.child));

        let mut out = String::new();
        self.open(&mut out, view.cluster, true, 0);
        self.write_body(&mut out, view.cluster, 1, &keep);

        // Internal edges first seen under a heading outside the subtree have no cluster to be
        // drawn in, so they go at the top level.
        let inside: HashSet<ClusterId> = self.graph.descendants(view.cluster).into_iter().collect();
        for edge in view.internal.iter().filter(|e| !inside.contains(&e.cluster)) {
            write_edge(&mut out, edge, 1);
        }

        if !view.external.is_empty() {
            let pad = INDENT;
            let _ = writeln!(out, "{pad}subgraph cluster_boundary {{");
            let attributes = boundary_attributes();
            write_attributes(&mut out, &attributes, 2);
            for node in &view.boundary {
                self.write_node(&mut out, *node, 2);
            }
            for edge in &view.external {
                write_edge(&mut out, edge, 2);
            }
            let _ = writeln!(out, "{pad}}}");
        }

        close(&mut out, 0);
        out
    }

    fn write_cluster(
        &self,
        out: &mut String,
        id: ClusterId,
        top_level: bool,
        depth: usize,
        keep: &dyn Fn(&Edge) -> bool,
    ) {
        self.open(out, id, top_level, depth);
        if top_level {
            self.write_foreign_nodes(out, id, depth + 1, keep);
        }
        self.write_body(out, id, depth + 1, keep);
        close(out, depth);
    }

    /// Declare endpoints of drawn edges whose owner lies outside the subtree, such as a node
    /// an earlier document still owns, so they keep their label instead of a bare `n<index>`.
    fn write_foreign_nodes(
        &self,
        out: &mut String,
        id: ClusterId,
        depth: usize,
        keep: &dyn Fn(&Edge) -> bool,
    ) {
        let owned = self.graph.subtree_nodes(id);
        let foreign: IndexSet<NodeId> = self
            .graph
            .descendants(id)
            .into_iter()
            .flat_map(move |cluster| {
                self.graph
                    .edges()
                    .tagged(cluster)
                    .filter(move |edge| keep(edge))
            })
            .flat_map(|edge| [edge.parent, edge.child])
            .filter(|node| !owned.contains(node))
            .collect();
        for node in foreign {
            self.write_node(out, node, depth);
        }
    }

    fn open(&self, out: &mut String, id: ClusterId, top_level: bool, depth: usize) {
        let cluster = self.graph.cluster(id);
        let pad = INDENT.repeat(depth);
        if top_level {
            let _ = writeln!(out, "{pad}digraph {} {{", identifier(&cluster.title));
        } else {
            let _ = writeln!(out, "{pad}subgraph cluster_{} {{", id.0);
        }
        let inner = INDENT.repeat(depth + 1);
        let _ = writeln!(
            out,
            "{inner}label=\"{}\";",
            format_label(&cluster.title, self.wrap_width)
        );
        if top_level {
            write_attributes(out, &self.graph_attributes, depth + 1);
        }
        write_attributes(out, &cluster.attributes, depth + 1);
    }

    fn write_body(
        &self,
        out: &mut String,
        id: ClusterId,
        depth: usize,
        keep: &dyn Fn(&Edge) -> bool,
    ) {
        let cluster = self.graph.cluster(id);
        for node in &cluster.nodes {
            self.write_node(out, *node, depth);
        }
        for edge in self.graph.edges().tagged(id).filter(|edge| keep(edge)) {
            write_edge(out, edge, depth);
        }
        for child in &cluster.children_indices {
            self.write_cluster(out, *child, false, depth, keep);
        }
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let node = self.graph.nodes().get(id);
        let pad = INDENT.repeat(depth);
        let _ = write!(
            out,
            "{pad}n{} [label=\"{}\"",
            id.0,
            format_label(&node.label, self.wrap_width)
        );
        for (key, value) in &node.attributes {
            let _ = write!(out, ", {key}=\"{}\"", escape(value));
        }
        out.push_str("];\n");
    }
}

fn close(out: &mut String, depth: usize) {
    let _ = writeln!(out, "{}}}", INDENT.repeat(depth));
}

fn write_edge(out: &mut String, edge: &Edge, depth: usize) {
    let _ = writeln!(
        out,
        "{}n{} -> n{};",
        INDENT.repeat(depth),
        edge.parent.0,
        edge.child.0
    );
}

fn write_attributes(out: &mut String, attributes: &BTreeMap<String, String>, depth: usize) {
    let pad = INDENT.repeat(depth);
    for (key, value) in attributes {
        let _ = writeln!(out, "{pad}{key}=\"{}\";", escape(value));
    }
}

fn boundary_attributes() -> BTreeMap<String, String> {
    [("label", "external"), ("style", "dashed"), ("color", "grey")]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// DOT keywords, matched case-insensitively.
const KEYWORDS: [&str; 6] = ["graph", "digraph", "subgraph", "node", "edge", "strict"];

#[must_use]
/// A bare DOT identifier derived from a title: anything but ASCII alphanumerics becomes `_`.
///
/// Titles that would start with a digit, be empty or spell a DOT keyword get a `g_` prefix.
pub fn identifier(title: &str) -> String {
    let ident: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let keyword = KEYWORDS
        .iter()
        .any(|keyword| ident.eq_ignore_ascii_case(keyword));
    match ident.chars().next() {
        Some(c) if !c.is_ascii_digit() && !keyword => ident,
        _ => format!("g_{ident}"),
    }
}

fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}

#[must_use]
/// Wrap `text` at `width` characters, escape quotes and join the lines with DOT `\n` markers.
pub fn format_label(text: &str, width: usize) -> String {
    wrap(text, width)
        .iter()
        .map(|line| escape(line))
        .collect::<Vec<_>>()
        .join("\\n")
}

#[must_use]
/// Greedy word wrap; words longer than `width` are broken. A width of 0 disables wrapping.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }
        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
        }

        let chars: Vec<char> = word.chars().collect();
        let mut pieces = chars.chunks(width).map(|chunk| chunk.iter().collect::<String>());
        let mut last = pieces.next().unwrap_or_default();
        for piece in pieces {
            lines.push(std::mem::replace(&mut last, piece));
        }
        current_len = last.chars().count();
        current = last;
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "tests/dot.rs"]
mod tests;
