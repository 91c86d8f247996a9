use std::sync::Arc;

use mayer_core::errors::{ErrorInfo, MayerError};
use mayer_core::provenance::SchemaVersion;
use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::coefficient::Coefficient;
use crate::edges::EdgeTable;
use crate::graph::{Graph, Node};

/// Schema written with every serialized diagram.
pub const GRAPH_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the diagram to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &Graph) -> Result<Vec<u8>, MayerError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| MayerError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a diagram from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<Graph, MayerError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| MayerError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the diagram to a JSON string.
pub fn graph_to_json(graph: &Graph) -> Result<String, MayerError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| MayerError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a diagram from a JSON string.
pub fn graph_from_json(json: &str) -> Result<Graph, MayerError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| MayerError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    schema_version: SchemaVersion,
    nodes: Vec<Node>,
    store: Bitmap,
    edges: Vec<SerializableEdge>,
    coefficient: Coefficient,
    factors: Vec<i32>,
}

// Only edges whose color differs from the default are listed; presence
// itself lives in `store`.
#[derive(Debug, Serialize, Deserialize)]
struct SerializableEdge {
    from: usize,
    to: usize,
    color: char,
}

impl SerializableGraph {
    fn from_graph(graph: &Graph) -> Self {
        let edges = graph
            .edges()
            .into_iter()
            .filter(|edge| edge.color != mayer_core::DEFAULT_COLOR)
            .map(|edge| SerializableEdge {
                from: edge.from,
                to: edge.to,
                color: edge.color,
            })
            .collect();
        Self {
            schema_version: GRAPH_SCHEMA,
            nodes: graph.nodes().to_vec(),
            store: graph.store().clone(),
            edges,
            coefficient: *graph.coefficient(),
            factors: graph.factors().to_vec(),
        }
    }

    fn into_graph(self) -> Result<Graph, MayerError> {
        if !GRAPH_SCHEMA.is_compatible_with(&self.schema_version) {
            return Err(MayerError::Serde(
                ErrorInfo::new("schema-version", "unsupported diagram schema")
                    .with_context("found", format!("{:?}", self.schema_version))
                    .with_context("supported", format!("{GRAPH_SCHEMA:?}")),
            ));
        }
        let table = Arc::new(EdgeTable::new(self.nodes.len()));
        let mut graph = Graph::from_parts(table, self.nodes, self.store)?;
        for edge in self.edges {
            graph.set_edge_color(edge.from, edge.to, edge.color)?;
        }
        graph.set_coefficient(self.coefficient);
        graph.set_num_factors(self.factors.len());
        graph.add_factors(&self.factors)?;
        Ok(graph)
    }
}
