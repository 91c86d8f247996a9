//! Articulation points and biconnected components via low-link depth-first search.

use crate::graph::Graph;
use crate::node_set::NodeSet;
use crate::traversal::{Traversal, TraversalEvent, Visitor};

/// Hopcroft-Tarjan block decomposition driven by an explicit frame stack.
///
/// Per connected component it emits the usual `VisitedNode` events while
/// exploring, then every block as `StartBiconnected`, the block members that
/// are not articulation points in increasing order, `EndBiconnected`, and
/// finally one `ArticulationPoint` per cut node in increasing order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Biconnected;

/// Blocks and cut nodes of a whole diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockReport {
    /// Every block with its full node set, articulation points included.
    pub blocks: Vec<NodeSet>,
    /// Articulation points over all components.
    pub articulation_points: NodeSet,
    /// Number of connected components.
    pub components: usize,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    parent: Option<usize>,
    cursor: usize,
}

struct LowLink {
    blocks: Vec<NodeSet>,
    articulation_points: NodeSet,
    reached: usize,
}

impl Biconnected {
    /// Computes blocks and articulation points of every component.
    pub fn blocks(&self, graph: &Graph) -> BlockReport {
        let adjacency = graph.adjacency();
        let goal = NodeSet::full(graph.node_count());
        let mut seen = NodeSet::empty();
        let mut report = BlockReport::default();
        while let Some(seed) = goal.difference(&seen).first() {
            let found = low_link(&adjacency, seed, &mut seen, &mut |_| {});
            report.blocks.extend(found.blocks);
            report.articulation_points = report
                .articulation_points
                .union(&found.articulation_points);
            report.components += 1;
        }
        report
    }
}

impl Traversal for Biconnected {
    fn traverse_from(
        &self,
        adjacency: &[NodeSet],
        root: usize,
        seen: &mut NodeSet,
        visitor: &mut Visitor<'_>,
    ) -> usize {
        if seen.contains(root) {
            return 0;
        }
        let found = low_link(adjacency, root, seen, visitor);
        for block in &found.blocks {
            visitor(TraversalEvent::StartBiconnected);
            for node in block.difference(&found.articulation_points) {
                visitor(TraversalEvent::BiconnectedNode(node));
            }
            visitor(TraversalEvent::EndBiconnected);
        }
        for node in found.articulation_points {
            visitor(TraversalEvent::ArticulationPoint(node));
        }
        found.reached
    }
}

fn low_link(
    adjacency: &[NodeSet],
    root: usize,
    seen: &mut NodeSet,
    visitor: &mut Visitor<'_>,
) -> LowLink {
    let node_count = adjacency.len();
    // discovery index, 0 while undiscovered
    let mut order = vec![0usize; node_count];
    let mut low = vec![0usize; node_count];
    let mut time = 0;
    let mut edges: Vec<(usize, usize)> = Vec::new();
    let mut blocks = Vec::new();
    let mut articulation_points = NodeSet::empty();
    let mut root_children = 0;

    let mut discover = |node: usize, order: &mut [usize], low: &mut [usize], seen: &mut NodeSet| {
        time += 1;
        order[node] = time;
        low[node] = time;
        seen.insert(node);
        visitor(TraversalEvent::VisitedNode(node));
    };

    discover(root, &mut order, &mut low, seen);
    let mut frames = vec![Frame {
        node: root,
        parent: None,
        cursor: 0,
    }];

    while let Some(&Frame {
        node,
        parent,
        cursor,
    }) = frames.last()
    {
        match adjacency[node].first_from(cursor) {
            Some(next) => {
                if let Some(top) = frames.last_mut() {
                    top.cursor = next + 1;
                }
                if order[next] == 0 {
                    edges.push((node, next));
                    discover(next, &mut order, &mut low, seen);
                    frames.push(Frame {
                        node: next,
                        parent: Some(node),
                        cursor: 0,
                    });
                } else if Some(next) != parent && order[next] < order[node] {
                    edges.push((node, next));
                    low[node] = low[node].min(order[next]);
                }
            }
            None => {
                frames.pop();
                let Some(up) = parent else {
                    continue;
                };
                low[up] = low[up].min(low[node]);
                if low[node] >= order[up] {
                    let mut block = NodeSet::empty();
                    while let Some((a, b)) = edges.pop() {
                        block.insert(a);
                        block.insert(b);
                        if (a, b) == (up, node) {
                            break;
                        }
                    }
                    blocks.push(block);
                    if up == root {
                        root_children += 1;
                    } else {
                        articulation_points.insert(up);
                    }
                }
            }
        }
    }

    if root_children >= 2 {
        articulation_points.insert(root);
    }
    if blocks.is_empty() {
        blocks.push(NodeSet::from_iter([root]));
    }
    LowLink {
        blocks,
        articulation_points,
        reached: time,
    }
}
