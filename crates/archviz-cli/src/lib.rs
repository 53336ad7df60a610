//! archviz command-line interface.
//!
pub mod input;
pub mod options;
pub mod output;
pub mod pipeline;

use std::path::PathBuf;

use archviz_core::{Result, VizConfig};

pub use options::{FigureOptions, default_output, resolve_config};
pub use output::RunSummary;
pub use pipeline::process;

/// Options for running archviz.
#[derive(Debug, Clone)]
pub struct ArchvizOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: VizConfig,
}

impl ArchvizOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: default_output(),
            config: VizConfig::default(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_config(mut self, config: VizConfig) -> Self {
        self.config = config;
        self
    }
}

/// Main entry point
pub fn run_main(opts: &ArchvizOptions) -> Result<RunSummary> {
    process(opts)
}
