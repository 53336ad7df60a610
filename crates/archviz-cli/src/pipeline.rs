//! Core processing pipeline: load → build graph → layout → styles → render.

use std::time::Instant;

use tracing::{debug, info};

use archviz_core::{Graph, Result, StyleSheet, layered_layout};
use archviz_draw::Scene;
use archviz_error::Error;

use crate::ArchvizOptions;
use crate::input::load_document;
use crate::output::{RunSummary, write_image};

/// Run every stage once, in order. Each stage only sees the previous one's output.
///
/// 1. Load and parse the input document
/// 2. Build the graph (dangling edges dropped)
/// 3. Compute the layered layout
/// 4. Resolve layer colors and edge patterns
/// 5. Render and write the image
pub fn process(opts: &ArchvizOptions) -> Result<RunSummary> {
    // 1. Load
    let document = load_document(&opts.input)?;
    let input_counts = (document.nodes.len(), document.edges.len());

    // 2. Build graph
    let build_start = Instant::now();
    let graph = Graph::from_document(document)?;
    info!(
        "Graph building: {:.2}s",
        build_start.elapsed().as_secs_f64()
    );
    if graph.dropped_edges() > 0 {
        debug!(dropped = graph.dropped_edges(), "edges referencing missing nodes were dropped");
    }
    if !graph.is_renderable() {
        return Err(Error::empty_graph(graph.node_count(), graph.edge_count())
            .with_operation("pipeline::process")
            .with_context("path", opts.input.display().to_string()));
    }

    // 3. Layout
    let layout_start = Instant::now();
    let layout = layered_layout(&graph, &opts.config.layout);
    info!("Layout: {:.2}s", layout_start.elapsed().as_secs_f64());

    // 4. Styles
    let styles = StyleSheet::resolve(&graph, &opts.config.style);
    debug!(layers = graph.layers().len(), relations = graph.relations().len(), "styles resolved");

    // 5. Render
    let scene = Scene::new(&graph, &layout, &styles);
    write_image(&scene, &opts.config.render, &opts.output, input_counts)
}
