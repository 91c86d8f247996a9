//! Boolean structural predicates over diagrams.

use crate::biconnected::Biconnected;
use crate::graph::Graph;
use crate::node_set::NodeSet;
use crate::traversal::{DepthFirst, Traversal, TraversalEvent};

/// A yes/no question about a diagram, usable as an enumeration filter.
pub trait Property {
    /// Evaluates the property.
    fn check(&self, graph: &Graph) -> bool;
}

impl<F> Property for F
where
    F: Fn(&Graph) -> bool,
{
    fn check(&self, graph: &Graph) -> bool {
        self(graph)
    }
}

/// Every node reachable from node 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsConnected;

/// Connected, at least three nodes and free of articulation points.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsBiconnected;

/// Some node splits its component when removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasArticulationPoint;

/// Some pair of nodes splits the remaining nodes when removed together.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasArticulationPair;

/// Some field node lies on every path between two connected roots.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasNodalPoint;

/// No edge joins two root nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasNoRootEdge;

impl Property for IsConnected {
    fn check(&self, graph: &Graph) -> bool {
        is_connected(graph)
    }
}

impl Property for IsBiconnected {
    fn check(&self, graph: &Graph) -> bool {
        is_biconnected(graph)
    }
}

impl Property for HasArticulationPoint {
    fn check(&self, graph: &Graph) -> bool {
        has_articulation_point(graph)
    }
}

impl Property for HasArticulationPair {
    fn check(&self, graph: &Graph) -> bool {
        has_articulation_pair(graph)
    }
}

impl Property for HasNodalPoint {
    fn check(&self, graph: &Graph) -> bool {
        has_nodal_point(graph)
    }
}

impl Property for HasNoRootEdge {
    fn check(&self, graph: &Graph) -> bool {
        has_no_root_edge(graph)
    }
}

/// Returns whether every node is reachable from node 0. Diagrams with at most
/// one node are connected.
pub fn is_connected(graph: &Graph) -> bool {
    let node_count = graph.node_count();
    if node_count <= 1 {
        return true;
    }
    if graph.edge_count() < node_count - 1 {
        return false;
    }
    let mut seen = NodeSet::empty();
    DepthFirst.traverse_component(graph, 0, &mut seen, &mut |_| {}) == node_count
}

/// Returns whether the diagram is connected and has no articulation point.
///
/// Diagrams with two nodes or fewer are never biconnected.
pub fn is_biconnected(graph: &Graph) -> bool {
    let node_count = graph.node_count();
    if node_count <= 2 || graph.edge_count() < node_count - 2 {
        return false;
    }
    is_connected(graph) && !has_articulation_point(graph)
}

/// Returns whether any component contains an articulation point.
pub fn has_articulation_point(graph: &Graph) -> bool {
    if graph.node_count() <= 2 {
        return false;
    }
    let mut found = false;
    Biconnected.traverse_all(graph, &mut |event| {
        if matches!(event, TraversalEvent::ArticulationPoint(_)) {
            found = true;
        }
    });
    found
}

/// Returns whether removing some two nodes leaves the other nodes disconnected.
///
/// Needs at least four nodes so that two remain after the removal.
pub fn has_articulation_pair(graph: &Graph) -> bool {
    let node_count = graph.node_count();
    if node_count < 4 {
        return false;
    }
    let adjacency = graph.adjacency();
    let all = NodeSet::full(node_count);
    for first in 0..node_count {
        for second in first + 1..node_count {
            let mut rest = all;
            rest.remove(first);
            rest.remove(second);
            if !connected_within(&adjacency, rest) {
                return true;
            }
        }
    }
    false
}

/// Returns whether some field node separates two roots that are otherwise
/// connected. Requires at least two roots.
pub fn has_nodal_point(graph: &Graph) -> bool {
    let node_count = graph.node_count();
    let roots: NodeSet = graph
        .nodes()
        .iter()
        .filter(|node| node.is_root())
        .map(|node| node.id())
        .collect();
    if roots.len() < 2 {
        return false;
    }
    let adjacency = graph.adjacency();
    let all = NodeSet::full(node_count);
    let linked = root_pairs_linked(&adjacency, all, roots);
    graph
        .nodes()
        .iter()
        .filter(|node| !node.is_root())
        .any(|node| {
            let mut rest = all;
            rest.remove(node.id());
            root_pairs_linked(&adjacency, rest, roots) < linked
        })
}

/// Returns whether no edge joins two roots.
pub fn has_no_root_edge(graph: &Graph) -> bool {
    let roots: Vec<usize> = graph
        .nodes()
        .iter()
        .filter(|node| node.is_root())
        .map(|node| node.id())
        .collect();
    roots
        .iter()
        .enumerate()
        .all(|(idx, &a)| roots[idx + 1..].iter().all(|&b| !graph.has_edge(a, b)))
}

fn reach_within(adjacency: &[NodeSet], allowed: NodeSet, seed: usize) -> NodeSet {
    let mut reached = NodeSet::from_iter([seed]);
    let mut frontier = vec![seed];
    while let Some(node) = frontier.pop() {
        let fresh = adjacency[node].intersection(&allowed).difference(&reached);
        for next in fresh {
            reached.insert(next);
            frontier.push(next);
        }
    }
    reached
}

fn connected_within(adjacency: &[NodeSet], allowed: NodeSet) -> bool {
    match allowed.first() {
        Some(seed) => reach_within(adjacency, allowed, seed) == allowed,
        None => true,
    }
}

// Number of unordered root pairs joined by a path inside `allowed`.
fn root_pairs_linked(adjacency: &[NodeSet], allowed: NodeSet, roots: NodeSet) -> usize {
    let mut pending = roots;
    let mut linked = 0;
    while let Some(seed) = pending.first() {
        let group = reach_within(adjacency, allowed, seed).intersection(&roots);
        let size = group.len();
        linked += size * (size - 1) / 2;
        pending = pending.difference(&group);
    }
    linked
}
