//! Graph model, layered layout and style resolution for archviz.
//!
//! # Module Structure
//!
//! - [`record`]: typed parsing of raw node/edge records
//! - [`graph`]: the canonical, immutable [`Graph`]
//! - [`layout`]: deterministic coordinate assignment
//! - [`style`]: layer colors and relation line patterns
//! - [`label`]: node label text
//! - [`config`]: every tunable constant, loadable from TOML

pub mod config;
pub mod graph;
pub mod label;
pub mod layout;
pub mod record;
pub mod style;

pub use archviz_error::{Error, ErrorKind, Result};

pub use config::{LayoutConfig, RenderConfig, StyleConfig, VizConfig};
pub use graph::{Edge, Graph, Node};
pub use label::{node_label, short_label};
pub use layout::{Bounds, Layout, Point, layered_layout};
pub use record::{EdgeRecord, GraphDocument, NodeRecord};
pub use style::{Color, LinePattern, StyleSheet};
