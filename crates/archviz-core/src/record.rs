//! Raw input records.
//!
//! The input document is loosely typed: keys may be missing, differ in case
//! or hold values of the wrong JSON type. This module turns each record into
//! a typed [`NodeRecord`] / [`EdgeRecord`] whose fields are all optional.
//! Defaults are *not* applied here; see [`crate::graph::Graph::build`].
//!
//! Key resolution order for a field `f`: the exact key `f`, then the first
//! key (in map order) equal to `f` ignoring ASCII case. Null values count as
//! absent, and so do empty node ids and names.

use serde_json::{Map, Value};

use archviz_error::{Error, Result};

/// Key under which some producers nest the graph.
pub const WRAPPER_KEY: &str = "graph_state";

/// A node record as found in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub layer: Option<u32>,
    pub kind: Option<String>,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = Some(layer);
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Parse one JSON object. Only the layer can fail here.
    pub fn from_json(index: usize, map: &Map<String, Value>) -> Result<Self> {
        let layer = match lookup(map, "layer") {
            Some(value) => Some(coerce_layer(value).map_err(|err| {
                err.with_operation("record::node")
                    .with_context("node", index.to_string())
            })?),
            None => None,
        };

        Ok(Self {
            id: lookup_text(map, "id"),
            name: lookup_text(map, "name"),
            layer,
            kind: lookup(map, "kind").and_then(scalar_string),
        })
    }
}

/// An edge record as found in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeRecord {
    pub id: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub relation: Option<String>,
}

impl EdgeRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    pub fn from_json(map: &Map<String, Value>) -> Self {
        Self {
            id: lookup(map, "id").and_then(scalar_string),
            source: lookup(map, "source").and_then(scalar_string),
            target: lookup(map, "target").and_then(scalar_string),
            relation: lookup(map, "type").and_then(scalar_string),
        }
    }
}

/// All records of one input document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphDocument {
    /// Parse a JSON document, either `{nodes, edges}` or `{graph_state: {nodes, edges}}`.
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|err| {
            Error::invalid_format(format!("input is not valid JSON: {err}"))
                .with_operation("record::parse")
                .set_source(err)
        })?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| invalid_shape("document", "an object"))?;

        let graph = match root.get(WRAPPER_KEY) {
            Some(wrapped) => wrapped
                .as_object()
                .ok_or_else(|| invalid_shape(WRAPPER_KEY, "an object"))?,
            None => root,
        };

        let nodes = records(graph, "nodes")?
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let map = value
                    .as_object()
                    .ok_or_else(|| invalid_shape("node", "an object").with_context("index", index.to_string()))?;
                NodeRecord::from_json(index, map)
            })
            .collect::<Result<Vec<_>>>()?;

        let edges = records(graph, "edges")?
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value
                    .as_object()
                    .map(EdgeRecord::from_json)
                    .ok_or_else(|| invalid_shape("edge", "an object").with_context("index", index.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { nodes, edges })
    }
}

fn records<'a>(graph: &'a Map<String, Value>, key: &'static str) -> Result<&'a [Value]> {
    match graph.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(invalid_shape(key, "an array")),
    }
}

fn invalid_shape(what: &'static str, expected: &str) -> Error {
    Error::invalid_format(format!("{what} must be {expected}"))
        .with_operation("record::parse")
        .with_context("field", what)
}

fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    find_key(map, key, |value| !value.is_null())
}

/// Like [`lookup`], but an empty string also counts as absent.
fn lookup_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    find_key(map, key, |value| !value.is_null() && value.as_str() != Some(""))
        .and_then(scalar_string)
}

fn find_key<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    present: impl Fn(&Value) -> bool,
) -> Option<&'a Value> {
    match map.get(key) {
        Some(value) if present(value) => Some(value),
        _ => map
            .iter()
            .find(|(k, v)| k.eq_ignore_ascii_case(key) && present(v))
            .map(|(_, v)| v),
    }
}

/// Strings pass through, numbers and booleans use their JSON text.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Interpret a layer value as a non-negative integer.
///
/// Integers are taken as is, floats are truncated toward zero and strings must
/// hold an integer literal.
pub fn coerce_layer(value: &Value) -> Result<u32> {
    const EXPECTED: &str = "a non-negative integer";
    let reject = || Error::field_coercion("layer", value.to_string(), EXPECTED);

    let wide: i128 = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i as i128
            } else if let Some(u) = n.as_u64() {
                u as i128
            } else {
                let f = n.as_f64().filter(|f| f.is_finite()).ok_or_else(reject)?;
                let truncated = f.trunc();
                if truncated.abs() > u32::MAX as f64 {
                    return Err(reject());
                }
                truncated as i128
            }
        }
        Value::String(s) => s.trim().parse::<i128>().map_err(|_| reject())?,
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => return Err(reject()),
    };

    u32::try_from(wide).map_err(|_| reject())
}

#[cfg(test)]
mod tests {
    use super::*;
    use archviz_error::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_top_level_and_wrapped_documents() {
        let flat = json!({
            "nodes": [{"id": "a"}, {"id": "b"}],
            "edges": [{"source": "a", "target": "b"}]
        });
        let wrapped = json!({ "graph_state": flat.clone(), "meta": {"phase": 5} });

        let a = GraphDocument::from_value(&flat).unwrap();
        let b = GraphDocument::from_value(&wrapped).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.nodes.len(), 2);
        assert_eq!(a.edges[0], EdgeRecord::new("a", "b"));
    }

    #[test]
    fn missing_arrays_are_empty() {
        let doc = GraphDocument::parse("{}").unwrap();
        assert!(doc.nodes.is_empty());
        assert!(doc.edges.is_empty());
    }

    #[test]
    fn rejects_malformed_documents() {
        let err = GraphDocument::parse("{ not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert!(err.source_ref().is_some());

        let err = GraphDocument::parse("[1, 2]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);

        let err = GraphDocument::parse(r#"{"nodes": {"id": "a"}}"#).unwrap_err();
        assert_eq!(err.context_value("field"), Some("nodes"));

        let err = GraphDocument::parse(r#"{"nodes": [{"id": "a"}, 3]}"#).unwrap_err();
        assert_eq!(err.context_value("index"), Some("1"));
    }

    #[test]
    fn node_keys_are_case_insensitive() {
        let doc = GraphDocument::parse(
            r#"{"nodes": [
                {"ID": "svc", "Name": "Service", "layer": "2"},
                {"Id": 17, "kind": "schema"},
                {"id": "x", "ID": "y"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            doc.nodes[0],
            NodeRecord::new("svc").with_name("Service").with_layer(2)
        );
        assert_eq!(doc.nodes[1], NodeRecord::new("17").with_kind("schema"));
        assert_eq!(doc.nodes[2].id.as_deref(), Some("x"));
    }

    #[test]
    fn null_fields_count_as_absent() {
        let doc = GraphDocument::parse(
            r#"{"nodes": [{"id": null, "ID": "b", "layer": null, "kind": null}],
                "edges": [{"source": "b", "target": "b", "type": null}]}"#,
        )
        .unwrap();
        assert_eq!(doc.nodes[0], NodeRecord::new("b"));
        assert_eq!(doc.edges[0].relation, None);
    }

    #[test]
    fn empty_id_and_name_fall_back_to_other_case() {
        let doc = GraphDocument::parse(
            r#"{"nodes": [
                {"id": "", "ID": "svc", "name": "", "Name": "Service"},
                {"id": "", "name": ""}
            ]}"#,
        )
        .unwrap();

        assert_eq!(doc.nodes[0], NodeRecord::new("svc").with_name("Service"));
        assert_eq!(doc.nodes[1], NodeRecord::default());
    }

    #[test]
    fn layer_coercion() {
        assert_eq!(coerce_layer(&json!(3)).unwrap(), 3);
        assert_eq!(coerce_layer(&json!(2.9)).unwrap(), 2);
        assert_eq!(coerce_layer(&json!(" 4 ")).unwrap(), 4);
        assert_eq!(coerce_layer(&json!(-0.5)).unwrap(), 0);

        for bad in [
            json!("top"),
            json!("1.5"),
            json!(-1),
            json!(true),
            json!([1]),
            json!(1e12),
            json!(u64::MAX),
        ] {
            let err = coerce_layer(&bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::FieldCoercion, "value {bad}");
        }
    }

    #[test]
    fn bad_layer_names_the_node() {
        let err = GraphDocument::parse(r#"{"nodes": [{"id": "a"}, {"id": "b", "layer": "x"}]}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldCoercion);
        assert_eq!(err.context_value("node"), Some("1"));
        assert_eq!(err.operation(), "record::node");
    }
}
