use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use archviz_cli::{ArchvizOptions, FigureOptions, resolve_config, run_main};
use archviz_core::{ErrorKind, Result};

#[derive(Parser, Debug)]
#[command(
    name = "archviz",
    about = "archviz: draw a layered architecture graph from JSON",
    version
)]
pub struct Cli {
    /// Input JSON file with `nodes` and `edges`
    #[arg(long = "in", value_name = "FILE")]
    input: PathBuf,

    /// Output image path; `.svg` writes SVG, anything else PNG
    #[arg(long = "out", value_name = "FILE", default_value = "graph.png")]
    output: PathBuf,

    /// TOML file with layout, style and render settings
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    figure: FigureOptions,
}

pub fn run(args: Cli) -> Result<String> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let config = resolve_config(args.config.as_deref(), &args.figure)?;
    let opts = ArchvizOptions::new(args.input)
        .with_output(args.output)
        .with_config(config);

    let summary = run_main(&opts)?;
    tracing::info!(
        total_secs = total_start.elapsed().as_secs_f64(),
        rendered_nodes = summary.rendered_nodes,
        rendered_edges = summary.rendered_edges,
        dropped_edges = summary.dropped_edges,
        "complete"
    );
    Ok(summary.to_string())
}

pub fn main() -> ExitCode {
    let args = Cli::parse();
    match run(args) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(e) if e.kind() == ErrorKind::EmptyGraph => {
            eprintln!("{}", e.message());
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "execution failed");
            ExitCode::from(e.exit_code())
        }
    }
}
