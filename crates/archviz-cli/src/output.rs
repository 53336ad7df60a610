//! Output generation (image file and run summary).

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use archviz_core::{RenderConfig, Result};
use archviz_draw::{ImageFormat, Scene, save_image};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub format: ImageFormat,
    /// Node records in the input document.
    pub nodes: usize,
    /// Edge records in the input document.
    pub edges: usize,
    pub rendered_nodes: usize,
    pub rendered_edges: usize,
    /// Input edges left out for referencing a missing node.
    pub dropped_edges: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Saved: {}  (nodes={}, edges={})",
            self.output.display(),
            self.nodes,
            self.edges
        )
    }
}

/// Render the scene to `path`.
///
/// `input_counts` are the node and edge record counts of the input document,
/// reported as is; the rendered counts come from the scene.
pub fn write_image(
    scene: &Scene<'_>,
    config: &RenderConfig,
    path: &Path,
    input_counts: (usize, usize),
) -> Result<RunSummary> {
    let render_start = Instant::now();
    let format = save_image(scene, config, path)?;

    info!(
        "Rendering: {:.2}s",
        render_start.elapsed().as_secs_f64()
    );

    let (nodes, edges) = input_counts;
    Ok(RunSummary {
        output: path.to_path_buf(),
        format,
        nodes,
        edges,
        rendered_nodes: scene.graph.node_count(),
        rendered_edges: scene.graph.edge_count(),
        dropped_edges: scene.graph.dropped_edges(),
    })
}
