use sha2::{Digest, Sha256};

use crate::graph::Graph;
use crate::serialization::GRAPH_SCHEMA;

/// Computes a SHA-256 digest of the labeled diagram.
///
/// Covers nodes, present edges with their colors, coefficient and factors.
/// Relabeled copies hash differently; use the isomorphism engine to compare
/// diagrams up to relabeling.
pub fn structural_hash(graph: &Graph) -> String {
    let mut hasher = Sha256::new();
    hasher.update(GRAPH_SCHEMA.major.to_le_bytes());
    hasher.update(GRAPH_SCHEMA.minor.to_le_bytes());

    hasher.update((graph.node_count() as u64).to_le_bytes());
    for node in graph.nodes() {
        hasher.update([node.kind().tag() as u8]);
        update_char(node.color(), &mut hasher);
    }

    let edges = graph.edges();
    hasher.update((edges.len() as u64).to_le_bytes());
    for edge in edges {
        hasher.update((edge.from as u64).to_le_bytes());
        hasher.update((edge.to as u64).to_le_bytes());
        update_char(edge.color, &mut hasher);
    }

    let coefficient = graph.coefficient();
    hasher.update(coefficient.numerator().to_le_bytes());
    hasher.update(coefficient.denominator().to_le_bytes());
    hasher.update([u8::from(coefficient.has_overflow())]);

    hasher.update((graph.factors().len() as u64).to_le_bytes());
    for factor in graph.factors() {
        hasher.update(factor.to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}

fn update_char(value: char, hasher: &mut Sha256) {
    hasher.update(u32::from(value).to_le_bytes());
}
