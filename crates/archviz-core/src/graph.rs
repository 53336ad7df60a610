//! Canonical graph model.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use archviz_error::{Error, Result};

use crate::record::{EdgeRecord, GraphDocument, NodeRecord};
use crate::style::DEFAULT_RELATION;

/// Kind assumed for nodes that carry none.
pub const DEFAULT_KIND: &str = "unknown";

/// A graph node with every default resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    /// Display name; equals `id` when the record had none.
    pub name: String,
    pub layer: u32,
    pub kind: String,
}

/// A directed edge between two nodes of the same graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    pub relation: String,
}

/// Immutable node/edge set. Every edge endpoint is a key of `nodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: BTreeMap<String, Node>,
    edges: Vec<Edge>,
    dropped_edges: usize,
}

impl Graph {
    /// Build a graph from raw records.
    ///
    /// A node without an identifier aborts the build. Edges whose source or
    /// target is not a node are dropped and only counted. When two records
    /// share an identifier, the later one wins.
    pub fn build(node_records: Vec<NodeRecord>, edge_records: Vec<EdgeRecord>) -> Result<Self> {
        let mut nodes = BTreeMap::new();
        for (index, record) in node_records.into_iter().enumerate() {
            let node = resolve_node(index, record)?;
            if let Some(previous) = nodes.insert(node.id.clone(), node) {
                warn!(id = %previous.id, index, "duplicate node id, keeping the later record");
            }
        }

        let total = edge_records.len();
        let edges: Vec<Edge> = edge_records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let edge = resolve_edge(record)?;
                if nodes.contains_key(&edge.source) && nodes.contains_key(&edge.target) {
                    Some(edge)
                } else {
                    debug!(index, source = %edge.source, target = %edge.target, "dropping dangling edge");
                    None
                }
            })
            .collect();

        let dropped_edges = total - edges.len();
        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            dropped_edges,
            "graph built"
        );

        Ok(Self {
            nodes,
            edges,
            dropped_edges,
        })
    }

    pub fn from_document(document: GraphDocument) -> Result<Self> {
        Self::build(document.nodes, document.edges)
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Edges in input order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of input edges dropped for referencing a missing node.
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// A graph is renderable when it has at least one node and one edge.
    pub fn is_renderable(&self) -> bool {
        !self.nodes.is_empty() && !self.edges.is_empty()
    }

    /// Distinct layer values, ascending.
    pub fn layers(&self) -> BTreeSet<u32> {
        self.nodes.values().map(|n| n.layer).collect()
    }

    /// Node ids grouped by layer, each group in ascending id order.
    pub fn layer_members(&self) -> BTreeMap<u32, Vec<&str>> {
        let mut members: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
        for node in self.nodes.values() {
            members.entry(node.layer).or_default().push(node.id.as_str());
        }
        members
    }

    /// Distinct relation types, ascending.
    pub fn relations(&self) -> BTreeSet<&str> {
        self.edges.iter().map(|e| e.relation.as_str()).collect()
    }

    /// Edges grouped by relation type, groups ascending, input order within a group.
    pub fn edges_by_relation(&self) -> BTreeMap<&str, Vec<&Edge>> {
        let mut groups: BTreeMap<&str, Vec<&Edge>> = BTreeMap::new();
        for edge in &self.edges {
            groups.entry(edge.relation.as_str()).or_default().push(edge);
        }
        groups
    }
}

fn resolve_node(index: usize, record: NodeRecord) -> Result<Node> {
    let id = record
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::missing_field("id", "node", index).with_operation("graph::build"))?;

    let name = record
        .name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| id.clone());

    Ok(Node {
        name,
        layer: record.layer.unwrap_or(0),
        kind: record.kind.unwrap_or_else(|| DEFAULT_KIND.to_string()),
        id,
    })
}

/// `None` when an endpoint is missing; such an edge can never be materialized.
fn resolve_edge(record: EdgeRecord) -> Option<Edge> {
    Some(Edge {
        id: record.id,
        source: record.source?,
        target: record.target?,
        relation: record
            .relation
            .filter(|relation| !relation.is_empty())
            .unwrap_or_else(|| DEFAULT_RELATION.to_string()),
    })
}
