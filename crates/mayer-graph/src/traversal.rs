//! Event-driven breadth-first and depth-first traversal over a diagram's adjacency.

use mayer_core::{ErrorInfo, MayerError};
use tracing::warn;

use crate::graph::Graph;
use crate::node_set::NodeSet;

/// Structural problems reported through the event channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalError {
    /// The diagram has no nodes.
    EmptyGraph,
    /// The requested root is not a node of the diagram.
    RootOutOfRange {
        /// Requested root.
        root: usize,
        /// Node count of the diagram.
        node_count: usize,
    },
}

impl From<TraversalError> for MayerError {
    fn from(err: TraversalError) -> Self {
        match err {
            TraversalError::EmptyGraph => MayerError::Traversal(ErrorInfo::new(
                "empty-graph",
                "cannot traverse a diagram without nodes",
            )),
            TraversalError::RootOutOfRange { root, node_count } => MayerError::Traversal(
                ErrorInfo::new("root-out-of-range", "traversal root is not a node")
                    .with_context("root", root)
                    .with_context("nodes", node_count),
            ),
        }
    }
}

/// Events emitted while traversing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalEvent {
    /// A connected component is about to be explored from `seed`.
    StartComponent {
        /// First node of the component.
        seed: usize,
    },
    /// A node was reached for the first time.
    VisitedNode(usize),
    /// The component explored from `seed` is exhausted.
    EndComponent {
        /// First node of the component.
        seed: usize,
    },
    /// A biconnected component (block) follows.
    StartBiconnected,
    /// A member of the current block that is not an articulation point.
    BiconnectedNode(usize),
    /// The current block is complete.
    EndBiconnected,
    /// A node whose removal disconnects its component.
    ArticulationPoint(usize),
    /// The traversal could not run.
    Error(TraversalError),
}

/// Callback receiving traversal events.
pub type Visitor<'a> = dyn FnMut(TraversalEvent) + 'a;

/// A strategy for exploring connected components.
pub trait Traversal {
    /// Explores the component of `root` over precomputed `adjacency`, marking
    /// nodes in `seen`. Returns the number of nodes reached. A root already in
    /// `seen` is a no-op.
    fn traverse_from(
        &self,
        adjacency: &[NodeSet],
        root: usize,
        seen: &mut NodeSet,
        visitor: &mut Visitor<'_>,
    ) -> usize;

    /// Explores the component of `root`, emitting start and end events around it.
    fn traverse_component(
        &self,
        graph: &Graph,
        root: usize,
        seen: &mut NodeSet,
        visitor: &mut Visitor<'_>,
    ) -> usize {
        if root >= graph.node_count() {
            let err = TraversalError::RootOutOfRange {
                root,
                node_count: graph.node_count(),
            };
            warn!(root, nodes = graph.node_count(), "traversal root out of range");
            visitor(TraversalEvent::Error(err));
            return 0;
        }
        if seen.contains(root) {
            return 0;
        }
        let adjacency = graph.adjacency();
        visitor(TraversalEvent::StartComponent { seed: root });
        let reached = self.traverse_from(&adjacency, root, seen, visitor);
        visitor(TraversalEvent::EndComponent { seed: root });
        reached
    }

    /// Explores every component, seeding each at the lowest unseen node.
    /// Returns the number of components; an empty diagram reports an error
    /// event and returns `0`.
    fn traverse_all(&self, graph: &Graph, visitor: &mut Visitor<'_>) -> usize {
        let node_count = graph.node_count();
        if node_count == 0 {
            warn!("traversal requested on an empty diagram");
            visitor(TraversalEvent::Error(TraversalError::EmptyGraph));
            return 0;
        }
        let adjacency = graph.adjacency();
        let goal = NodeSet::full(node_count);
        let mut seen = NodeSet::empty();
        let mut components = 0;
        while seen != goal {
            let Some(seed) = goal.difference(&seen).first() else {
                break;
            };
            visitor(TraversalEvent::StartComponent { seed });
            self.traverse_from(&adjacency, seed, &mut seen, visitor);
            visitor(TraversalEvent::EndComponent { seed });
            components += 1;
        }
        components
    }
}

/// FIFO traversal; nodes are marked seen when enqueued.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl Traversal for BreadthFirst {
    fn traverse_from(
        &self,
        adjacency: &[NodeSet],
        root: usize,
        seen: &mut NodeSet,
        visitor: &mut Visitor<'_>,
    ) -> usize {
        if !seen.insert(root) {
            return 0;
        }
        visitor(TraversalEvent::VisitedNode(root));
        let mut reached = 1;
        let mut queue = std::collections::VecDeque::from([root]);
        while let Some(node) = queue.pop_front() {
            for next in adjacency[node].difference(seen) {
                seen.insert(next);
                visitor(TraversalEvent::VisitedNode(next));
                queue.push_back(next);
                reached += 1;
            }
        }
        reached
    }
}

/// Depth-first traversal over an explicit stack.
///
/// The top of the stack is inspected without removal; its first unseen
/// neighbor is visited and pushed, and the node is popped only once all of
/// its neighbors are seen.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl Traversal for DepthFirst {
    fn traverse_from(
        &self,
        adjacency: &[NodeSet],
        root: usize,
        seen: &mut NodeSet,
        visitor: &mut Visitor<'_>,
    ) -> usize {
        if !seen.insert(root) {
            return 0;
        }
        visitor(TraversalEvent::VisitedNode(root));
        let mut reached = 1;
        let mut stack = vec![root];
        while let Some(&node) = stack.last() {
            match adjacency[node].difference(seen).first() {
                Some(next) => {
                    seen.insert(next);
                    visitor(TraversalEvent::VisitedNode(next));
                    stack.push(next);
                    reached += 1;
                }
                None => {
                    stack.pop();
                }
            }
        }
        reached
    }
}

/// Collects the events of a full traversal.
pub fn collect_events<T: Traversal + ?Sized>(traversal: &T, graph: &Graph) -> Vec<TraversalEvent> {
    let mut events = Vec::new();
    traversal.traverse_all(graph, &mut |event| events.push(event));
    events
}
