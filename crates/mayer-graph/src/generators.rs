use mayer_core::errors::MayerError;
use mayer_core::rng::RngHandle;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::graph::Graph;

/// Samples a diagram where each potential edge is present with probability
/// `edge_probability`.
pub fn gen_random(
    node_count: usize,
    root_count: usize,
    edge_probability: f64,
    rng: &mut RngHandle,
) -> Result<Graph, MayerError> {
    if !(0.0..=1.0).contains(&edge_probability) {
        return Err(MayerError::graph(
            "edge-probability",
            "edge probability must lie in [0, 1]",
        )
        .with_context("probability", edge_probability));
    }
    let mut graph = Graph::new(node_count, root_count)?;
    for from in 0..node_count {
        for to in (from + 1)..node_count {
            if rng.gen_bool(edge_probability) {
                graph.put_edge(from, to)?;
            }
        }
    }
    Ok(graph)
}

/// Ring `0-1-..-(n-1)-0`. Fewer than three nodes give a path.
pub fn gen_cycle(node_count: usize, root_count: usize) -> Result<Graph, MayerError> {
    let mut graph = gen_path(node_count, root_count)?;
    if node_count >= 3 {
        graph.put_edge(node_count - 1, 0)?;
    }
    Ok(graph)
}

/// Chain `0-1-..-(n-1)`.
pub fn gen_path(node_count: usize, root_count: usize) -> Result<Graph, MayerError> {
    let mut graph = Graph::new(node_count, root_count)?;
    for node in 1..node_count {
        graph.put_edge(node - 1, node)?;
    }
    Ok(graph)
}

/// Every pair of nodes joined.
pub fn gen_complete(node_count: usize, root_count: usize) -> Result<Graph, MayerError> {
    let mut graph = Graph::new(node_count, root_count)?;
    for from in 0..node_count {
        for to in (from + 1)..node_count {
            graph.put_edge(from, to)?;
        }
    }
    Ok(graph)
}

/// Uniform permutation of `0..n`.
pub fn random_permutation(node_count: usize, rng: &mut RngHandle) -> Vec<usize> {
    let mut permutation: Vec<usize> = (0..node_count).collect();
    permutation.shuffle(rng);
    permutation
}

/// Permutation of `0..n` that shuffles roots among roots and field nodes
/// among field nodes, keeping every node's color class.
pub fn random_relabeling(graph: &Graph, rng: &mut RngHandle) -> Vec<usize> {
    let mut permutation: Vec<usize> = (0..graph.node_count()).collect();
    let mut classes: std::collections::BTreeMap<(mayer_core::NodeKind, char), Vec<usize>> =
        Default::default();
    for node in graph.nodes() {
        classes
            .entry((node.kind(), node.color()))
            .or_default()
            .push(node.id());
    }
    for members in classes.values() {
        let mut targets = members.clone();
        targets.shuffle(rng);
        for (source, target) in members.iter().zip(targets) {
            permutation[*source] = target;
        }
    }
    permutation
}

/// Samples `count` diagrams, diagram `i` drawn from substream `i` of `seed`.
///
/// A diagram depends only on `seed` and its index, never on `count`.
pub fn sample_diagrams(
    count: usize,
    node_count: usize,
    root_count: usize,
    edge_probability: f64,
    seed: u64,
) -> Result<Vec<Graph>, MayerError> {
    let master = RngHandle::from_seed(seed);
    (0..count as u64)
        .map(|index| gen_random(node_count, root_count, edge_probability, &mut master.fork(index)))
        .collect()
}
