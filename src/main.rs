//! markgraph: Turn markdown outlines into Graphviz graphs.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use log::{error, info, LevelFilter};
use markgraph::{config, dot, export, graph, render, summary};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "markgraph")]
#[command(about = "Turn markdown outlines into Graphviz graphs", long_about = None)]
struct Args {
    /// Outline documents to process, in order
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,

    /// Print a JSON summary of each document instead of DOT
    #[arg(long)]
    json: bool,

    /// Skip exports triggered by graph_<heading>.<filetype> mentions
    #[arg(long)]
    no_export: bool,

    /// Directory to write exports into (defaults to each document's directory)
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Renderer program used for exports
    #[arg(long, value_name = "PROGRAM")]
    renderer: Option<String>,

    /// Label wrap width in characters (0 disables wrapping)
    #[arg(long, short = 'w', value_name = "N")]
    wrap_width: Option<usize>,

    /// Config file to load instead of ./markgraph.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let mut cfg = args
        .config
        .as_deref()
        .map_or_else(config::Config::load, config::Config::load_explicit);

    // Override config with command line args
    if let Some(width) = args.wrap_width {
        cfg.wrap_width = width;
    }
    if let Some(renderer) = &args.renderer {
        cfg.renderer.clone_from(renderer);
    }
    if let Some(dir) = &args.output_dir {
        cfg.output_dir = dir.to_string_lossy().to_string();
    }

    let renderer = render::DotRenderer::new(&cfg.renderer);
    let mut state = graph::Graph::new();
    let mut failed = false;

    for path in &args.paths {
        match process(&mut state, path, &args, &cfg, &renderer) {
            Ok(ok) => failed |= !ok,
            Err(e) => {
                error!("{}: {e}", path.display());
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Parse one document, run its exports and print it. Returns `Ok(false)` if an export failed.
fn process(
    state: &mut graph::Graph,
    path: &Path,
    args: &Args,
    cfg: &config::Config,
    renderer: &render::DotRenderer,
) -> markgraph::error::Result<bool> {
    let text = fs::read_to_string(path)?;
    let title = path
        .file_name()
        .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy())
        .to_string();

    let document = state.parse_document(&title, &text)?;
    info!(
        "{}: {} export request(s)",
        path.display(),
        document.mentions.len()
    );

    let serializer =
        dot::Serializer::new(state, cfg.wrap_width).with_graph_attribute("rankdir", &cfg.rankdir);

    let mut ok = true;
    if !args.no_export {
        let output_dir = if cfg.output_dir.is_empty() {
            path.parent().map_or_else(PathBuf::new, Path::to_path_buf)
        } else {
            PathBuf::from(&cfg.output_dir)
        };
        let report = export::export_document(&serializer, &document, renderer, &output_dir);
        ok = !report.has_failures();
    }

    if args.json {
        let summary = summary::summarize(state, document.root);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", serializer.render(document.root));
    }

    Ok(ok)
}
