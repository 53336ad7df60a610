//! Input document loading.

use std::path::Path;

use tracing::info;

use archviz_core::{GraphDocument, Result};
use archviz_error::Error;

/// Read and parse the graph document at `path`.
pub fn load_document(path: &Path) -> Result<GraphDocument> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        Error::from(err)
            .with_operation("input::load_document")
            .with_context("path", path.display().to_string())
    })?;

    let document = GraphDocument::parse(&content)
        .map_err(|err| err.with_context("path", path.display().to_string()))?;

    info!(
        path = %path.display(),
        nodes = document.nodes.len(),
        edges = document.edges.len(),
        "input loaded"
    );
    Ok(document)
}
