use super::{export_document, ExportView};
use crate::dot::Serializer;
use crate::error::RenderError;
use crate::graph::Graph;
use crate::registry::NodeId;
use crate::render::Renderer;
use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Records every call and fails for one chosen filetype.
#[derive(Default)]
struct FakeRenderer {
    calls: RefCell<Vec<(String, String, PathBuf)>>,
    fail_on: Option<&'static str>,
}

impl Renderer for FakeRenderer {
    fn render(&self, payload: &str, filetype: &str, output: &Path) -> Result<(), RenderError> {
        self.calls.borrow_mut().push((
            payload.to_string(),
            filetype.to_string(),
            output.to_path_buf(),
        ));
        if self.fail_on == Some(filetype) {
            return Err(RenderError::Write {
                program: "fake".to_string(),
                source: io::Error::other("broken pipe"),
            });
        }
        Ok(())
    }
}

fn labels(graph: &Graph, nodes: impl IntoIterator<Item = NodeId>) -> HashSet<String> {
    nodes
        .into_iter()
        .map(|id| graph.nodes().get(id).label.clone())
        .collect()
}

#[test]
fn test_alpha_export_scenario() {
    let text = "# Alpha\n* X\n  * Y\n\nThe picture is in graph_Alpha.svg.";
    let mut graph = Graph::new();
    let doc = graph.parse_document("doc", text).unwrap();

    assert_eq!(doc.mentions.len(), 1);
    assert_eq!(doc.mentions[0].filetype, "svg");

    let alpha = graph.find_cluster(doc.root, "Alpha").unwrap();
    let view = ExportView::project(&graph, alpha);
    assert_eq!(
        labels(&graph, view.nodes.iter().copied()),
        HashSet::from(["X".to_string(), "Y".to_string()])
    );
    assert_eq!(view.internal.len(), 1);
    assert_eq!(graph.nodes().get(view.internal[0].parent).label, "X");
    assert_eq!(graph.nodes().get(view.internal[0].child).label, "Y");
    assert!(view.external.is_empty());
    assert!(view.boundary.is_empty());

    let renderer = FakeRenderer::default();
    let serializer = Serializer::new(&graph, 30);
    let report = export_document(&serializer, &doc, &renderer, Path::new("out"));

    assert_eq!(report.written, [PathBuf::from("out/graph_Alpha.svg")]);
    assert!(report.unresolved.is_empty());
    assert!(!report.has_failures());

    let calls = renderer.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (payload, filetype, output) = &calls[0];
    assert_eq!(filetype, "svg");
    assert_eq!(output, &PathBuf::from("out/graph_Alpha.svg"));
    assert!(payload.starts_with("digraph Alpha {"), "{payload}");
    assert!(payload.contains("n0 -> n1;"));
    assert!(!payload.contains("cluster_boundary"));
}

#[test]
fn test_crossing_edges_go_to_boundary() {
    let text = "* Hub\n# Alpha\n* X\n  * Y |Hub|\n# Beta\n* Z graph_Alpha.png";
    let mut graph = Graph::new();
    let doc = graph.parse_document("doc", text).unwrap();
    let alpha = graph.find_cluster(doc.root, "Alpha").unwrap();

    let view = ExportView::project(&graph, alpha);
    assert_eq!(
        labels(&graph, view.boundary.iter().copied()),
        HashSet::from(["Hub".to_string()])
    );
    assert_eq!(view.internal.len(), 1);
    assert_eq!(view.external.len(), 1);
    assert!(!view.nodes.contains(&view.boundary[0]));

    let payload = Serializer::new(&graph, 30).render_export(&view);
    let boundary = payload.find("subgraph cluster_boundary {").unwrap();
    assert!(payload[boundary..].contains("style=\"dashed\";"));
    assert!(payload[boundary..].contains("n0 [label=\"Hub\"];"));
    assert!(payload[boundary..].contains("n2 -> n0;"));
    assert!(
        !payload.contains("label=\"Beta\""),
        "Sibling headings are not part of the export"
    );
}

#[test]
fn test_internal_edge_tagged_outside_subtree() {
    let text = "# Alpha\n* A\n* B\n# Beta\n* A\n  * B";
    let mut graph = Graph::new();
    let doc = graph.parse_document("doc", text).unwrap();
    let alpha = graph.find_cluster(doc.root, "Alpha").unwrap();

    let view = ExportView::project(&graph, alpha);
    assert_eq!(view.internal.len(), 1);
    let payload = Serializer::new(&graph, 30).render_export(&view);
    assert!(payload.contains("    n0 -> n1;\n"), "{payload}");
}

#[test]
fn test_unresolved_mention_is_reported() {
    let text = "# Alpha\n* X\ngraph_Nope.svg";
    let mut graph = Graph::new();
    let doc = graph.parse_document("doc", text).unwrap();

    let renderer = FakeRenderer::default();
    let report = export_document(
        &Serializer::new(&graph, 30),
        &doc,
        &renderer,
        Path::new("."),
    );
    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(report.unresolved[0].query, "Nope");
    assert!(report.written.is_empty());
    assert!(renderer.calls.borrow().is_empty());
}

#[test]
fn test_failed_export_does_not_affect_others() {
    let text = "# Alpha\n* X\n  * Y\n# Beta\n* Z\ngraph_Alpha.bad graph_Alpha.svg graph_Beta.png";
    let mut graph = Graph::new();
    let doc = graph.parse_document("doc", text).unwrap();
    let edges_before = graph.edges().len();

    let renderer = FakeRenderer {
        fail_on: Some("bad"),
        ..FakeRenderer::default()
    };
    let serializer = Serializer::new(&graph, 30);
    let report = export_document(&serializer, &doc, &renderer, Path::new("out"));

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0.filename, "graph_Alpha.bad");
    assert_eq!(
        report.written,
        [
            PathBuf::from("out/graph_Alpha.svg"),
            PathBuf::from("out/graph_Beta.png"),
        ]
    );

    let calls = renderer.calls.borrow();
    assert_eq!(calls[0].0, calls[1].0, "Same subtree renders identically");
    assert_eq!(graph.edges().len(), edges_before);
}

#[test]
fn test_duplicate_filenames_export_once() {
    let text = "# Alpha\n* X\ngraph_Alpha.svg\nagain graph_Alpha.svg";
    let mut graph = Graph::new();
    let doc = graph.parse_document("doc", text).unwrap();

    let renderer = FakeRenderer::default();
    let report = export_document(
        &Serializer::new(&graph, 30),
        &doc,
        &renderer,
        Path::new("."),
    );
    assert_eq!(report.written.len(), 1);
    assert_eq!(renderer.calls.borrow().len(), 1);
}

#[test]
fn test_keyword_heading_exports_valid_graph_name() {
    let mut graph = Graph::new();
    let doc = graph
        .parse_document("doc", "# Graph\n* X graph_Graph.svg\n  * Y")
        .unwrap();

    let renderer = FakeRenderer::default();
    let serializer = Serializer::new(&graph, 30);
    let report = export_document(&serializer, &doc, &renderer, Path::new("out"));
    assert_eq!(report.written, [PathBuf::from("out/graph_Graph.svg")]);

    let calls = renderer.calls.borrow();
    let payload = &calls[0].0;
    assert!(
        payload.starts_with("digraph g_Graph {\n    label=\"Graph\";\n"),
        "{payload}"
    );
}
