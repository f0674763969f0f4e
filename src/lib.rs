//! markgraph: turn markdown outlines into Graphviz graphs.
//!
//! Bulleted and numbered list items become nodes, indentation and numbering become edges, and
//! headings become nested clusters. Mentions of `graph_<heading>.<filetype>` export the subtree
//! under that heading through an external renderer.

pub mod ancestry;
pub mod cluster;
pub mod config;
pub mod dot;
pub mod edges;
pub mod error;
pub mod export;
pub mod graph;
pub mod line;
pub mod registry;
pub mod render;
pub mod summary;
