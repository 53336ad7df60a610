use std::path::Path;
use std::process::Command;

use pretty_assertions::assert_eq;

use archviz_cli::{ArchvizOptions, run_main};
use archviz_core::{ErrorKind, RenderConfig, VizConfig};
use archviz_draw::ImageFormat;

const THREE_NODES: &str = r#"{
  "nodes": [
    {"id": "A", "name": "A", "layer": 0},
    {"id": "B", "name": "B", "layer": 0},
    {"id": "C", "name": "C", "layer": 1}
  ],
  "edges": [
    {"source": "A", "target": "C", "type": "depends_on"},
    {"source": "B", "target": "C"}
  ]
}"#;

fn small_config() -> VizConfig {
    VizConfig {
        render: RenderConfig::default().with_figure_size(4.0, 3.0).with_dpi(40.0),
        ..VizConfig::default()
    }
}

fn write_input(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("graph.json");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn renders_png_and_reports_input_counts() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        r#"{
          "nodes": [
            {"id": "A", "layer": 0},
            {"id": "B", "layer": 0},
            {"id": "C", "layer": 1}
          ],
          "edges": [
            {"source": "A", "target": "C"},
            {"source": "B", "target": "C"},
            {"source": "C", "target": "ghost", "type": "invokes"}
          ]
        }"#,
    );
    let output = dir.path().join("out.png");

    let opts = ArchvizOptions::new(&input)
        .with_output(&output)
        .with_config(small_config());
    let summary = run_main(&opts).unwrap();

    assert_eq!(summary.format, ImageFormat::Png);
    assert_eq!((summary.nodes, summary.edges), (3, 3));
    assert_eq!((summary.rendered_nodes, summary.rendered_edges), (3, 2));
    assert_eq!(summary.dropped_edges, 1);
    assert_eq!(
        summary.to_string(),
        format!("Saved: {}  (nodes=3, edges=3)", output.display())
    );

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn svg_extension_writes_svg_into_new_directories() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), THREE_NODES);
    let output = dir.path().join("nested").join("deeper").join("graph.SVG");

    let opts = ArchvizOptions::new(&input)
        .with_output(&output)
        .with_config(small_config());
    let summary = run_main(&opts).unwrap();

    assert_eq!(summary.format, ImageFormat::Svg);
    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Layer 1"));
}

#[test]
fn only_dangling_edges_is_an_empty_graph() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        r#"{"nodes": [{"id": "A", "layer": 0}],
            "edges": [{"source": "A", "target": "Z", "type": "invokes"}]}"#,
    );
    let output = dir.path().join("dangling.svg");

    let err = run_main(&ArchvizOptions::new(&input).with_output(&output)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyGraph);
    assert_eq!(err.exit_code(), 2);
    assert_eq!(err.context_value("edges"), Some("0"));
    assert!(!output.exists());
}

#[test]
fn empty_graph_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), r#"{"nodes": [], "edges": []}"#);
    let output = dir.path().join("empty.png");

    let err = run_main(&ArchvizOptions::new(&input).with_output(&output)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyGraph);
    assert_eq!(err.exit_code(), 2);
    assert!(!output.exists());
}

#[test]
fn missing_input_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let opts = ArchvizOptions::new(dir.path().join("absent.json"))
        .with_output(dir.path().join("x.png"));

    let err = run_main(&opts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
    assert!(err.context_value("path").unwrap().ends_with("absent.json"));
}

#[test]
fn bad_layer_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        r#"{"nodes": [{"id": "A", "layer": "top"}], "edges": []}"#,
    );
    let output = dir.path().join("bad.png");

    let err = run_main(&ArchvizOptions::new(&input).with_output(&output)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FieldCoercion);
    assert!(!output.exists());
}

#[test]
fn binary_exits_with_status_two_on_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), r#"{"graph_state": {"nodes": [], "edges": []}}"#);
    let output = dir.path().join("never.png");

    let result = Command::new(env!("CARGO_BIN_EXE_archviz"))
        .arg("--in")
        .arg(&input)
        .arg("--out")
        .arg(&output)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(2));
    assert_eq!(
        String::from_utf8_lossy(&result.stderr).trim(),
        "No nodes or edges found in input JSON."
    );
    assert!(!output.exists());
}

#[test]
fn binary_prints_summary_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), THREE_NODES);
    let output = dir.path().join("cli.svg");

    let result = Command::new(env!("CARGO_BIN_EXE_archviz"))
        .arg("--in")
        .arg(&input)
        .arg("--out")
        .arg(&output)
        .args(["--w", "6", "--h", "4", "--font", "10", "--dpi", "72", "--no-labels"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&result.stdout).trim(),
        format!("Saved: {}  (nodes=3, edges=2)", output.display())
    );
    assert!(output.exists());
}

#[test]
fn binary_reports_other_errors_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "not json");

    let result = Command::new(env!("CARGO_BIN_EXE_archviz"))
        .arg("--in")
        .arg(&input)
        .arg("--out")
        .arg(dir.path().join("x.png"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).starts_with("Error: "));
}
