use mayer_core::NodeKind;
use mayer_graph::{Graph, NodeSet};

/// Lookup tables of one diagram, built once per comparison.
#[derive(Debug, Clone)]
pub(crate) struct Side {
    pub(crate) adjacency: Vec<NodeSet>,
    labels: Vec<(NodeKind, char)>,
    // row-major node_count x node_count, `None` where no edge
    colors: Vec<Option<char>>,
}

impl Side {
    fn new(graph: &Graph) -> Self {
        let node_count = graph.node_count();
        let mut colors = vec![None; node_count * node_count];
        for edge in graph.edges() {
            colors[edge.from * node_count + edge.to] = Some(edge.color);
            colors[edge.to * node_count + edge.from] = Some(edge.color);
        }
        Self {
            adjacency: graph.adjacency(),
            labels: graph.nodes().iter().map(|n| (n.kind(), n.color())).collect(),
            colors,
        }
    }

    pub(crate) fn color(&self, a: usize, b: usize) -> Option<char> {
        self.colors[a * self.labels.len() + b]
    }

    pub(crate) fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }
}

/// Both diagrams of a comparison in matcher-friendly form.
///
/// Callers only build a context for diagrams with equal node counts.
#[derive(Debug, Clone)]
pub struct MatchContext {
    pub(crate) first: Side,
    pub(crate) second: Side,
    node_count: usize,
}

impl MatchContext {
    /// Builds the lookup tables for a pair of diagrams with the same node count.
    pub fn new(first: &Graph, second: &Graph) -> Self {
        Self {
            first: Side::new(first),
            second: Side::new(second),
            node_count: first.node_count(),
        }
    }

    /// Number of nodes in each diagram.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Same kind, color and degree.
    pub(crate) fn compatible(&self, n1: usize, n2: usize) -> bool {
        self.first.labels[n1] == self.second.labels[n2]
            && self.first.degree(n1) == self.second.degree(n2)
    }

    /// Edge presence and color between the candidate pair and every mapped
    /// pair agree in both diagrams.
    pub(crate) fn core_consistent(
        &self,
        n1: usize,
        n2: usize,
        mapped: impl Iterator<Item = (usize, usize)>,
    ) -> bool {
        mapped.into_iter().all(|(m1, m2)| self.first.color(n1, m1) == self.second.color(n2, m2))
    }
}
