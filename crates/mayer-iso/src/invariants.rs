use std::collections::BTreeMap;

use mayer_graph::Graph;
use serde::{Deserialize, Serialize};

/// First pre-match check that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mismatch {
    /// Different node counts.
    NodeCount,
    /// Different edge counts.
    EdgeCount,
    /// Field nodes use different color sets.
    FieldColors,
    /// Root nodes use different color sets.
    RootColors,
    /// Some color partition has a different size.
    PartitionSizes,
    /// Some color partition has a different sorted degree sequence.
    DegreeSequence,
    /// Edge colors occur with different multiplicities.
    EdgeColors,
}

/// Relabeling-invariant summary of a diagram.
///
/// Two diagrams can only be isomorphic when their invariants are equal, so the
/// value doubles as a bucket key when deduplicating diagrams.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphInvariants {
    node_count: usize,
    edge_count: usize,
    /// Sorted degrees of the root nodes, per color.
    roots: BTreeMap<char, Vec<usize>>,
    /// Sorted degrees of the field nodes, per color.
    fields: BTreeMap<char, Vec<usize>>,
    edge_colors: BTreeMap<char, usize>,
}

impl GraphInvariants {
    /// Collects the invariants of `graph`.
    pub fn of(graph: &Graph) -> Self {
        let adjacency = graph.adjacency();
        let mut roots: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        let mut fields: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        for node in graph.nodes() {
            let partition = if node.is_root() { &mut roots } else { &mut fields };
            partition
                .entry(node.color())
                .or_default()
                .push(adjacency[node.id()].len());
        }
        for degrees in roots.values_mut().chain(fields.values_mut()) {
            degrees.sort_unstable();
        }
        let mut edge_colors = BTreeMap::new();
        for edge in graph.edges() {
            *edge_colors.entry(edge.color).or_insert(0) += 1;
        }
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            roots,
            fields,
            edge_colors,
        }
    }

    /// Node count.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Edge count.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Runs the pre-match checks in order and reports the first failure.
    pub fn compare(&self, other: &GraphInvariants) -> Result<(), Mismatch> {
        if self.node_count != other.node_count {
            return Err(Mismatch::NodeCount);
        }
        if self.edge_count != other.edge_count {
            return Err(Mismatch::EdgeCount);
        }
        if !self.fields.keys().eq(other.fields.keys()) {
            return Err(Mismatch::FieldColors);
        }
        if !self.roots.keys().eq(other.roots.keys()) {
            return Err(Mismatch::RootColors);
        }
        let sizes = |map: &BTreeMap<char, Vec<usize>>| map.values().map(Vec::len).collect::<Vec<_>>();
        if sizes(&self.roots) != sizes(&other.roots) || sizes(&self.fields) != sizes(&other.fields) {
            return Err(Mismatch::PartitionSizes);
        }
        if self.roots != other.roots || self.fields != other.fields {
            return Err(Mismatch::DegreeSequence);
        }
        if self.edge_colors != other.edge_colors {
            return Err(Mismatch::EdgeColors);
        }
        Ok(())
    }
}

/// Cheap rejection of diagram pairs that cannot be isomorphic.
pub fn prematch(first: &Graph, second: &Graph) -> Result<(), Mismatch> {
    GraphInvariants::of(first).compare(&GraphInvariants::of(second))
}
