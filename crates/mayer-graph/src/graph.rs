use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use mayer_core::{edge_capacity, EdgeId, MayerError, NodeKind, DEFAULT_COLOR, MAX_NODE_COUNT};
use serde::{Deserialize, Serialize};

use crate::bitmap::{Bitmap, Bitset};
use crate::coefficient::Coefficient;
use crate::edges::EdgeTable;
use crate::node_set::NodeSet;
use crate::traversal::{DepthFirst, Traversal};

/// A diagram node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    kind: NodeKind,
    color: char,
}

impl Node {
    /// Creates a node.
    pub fn new(id: usize, kind: NodeKind, color: char) -> Self {
        Self { id, kind, color }
    }

    /// Creates a root node with the default color.
    pub fn root(id: usize) -> Self {
        Self::new(id, NodeKind::Root, DEFAULT_COLOR)
    }

    /// Creates a field node with the default color.
    pub fn field(id: usize) -> Self {
        Self::new(id, NodeKind::Field, DEFAULT_COLOR)
    }

    /// Dense node id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Root or field.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Color tag.
    pub fn color(&self) -> char {
        self.color
    }

    /// Returns whether this is a root node.
    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.id, self.kind.tag(), self.color)
    }
}

/// A present edge with its endpoints and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Edge id within the diagram's [`EdgeTable`].
    pub id: EdgeId,
    /// Smaller endpoint.
    pub from: usize,
    /// Larger endpoint.
    pub to: usize,
    /// Interaction type tag.
    pub color: char,
}

/// Labeled diagram: nodes with kind and color, an edge [`Bitmap`], a rational
/// coefficient and an exponent vector of auxiliary factors.
///
/// `Clone` is a deep copy of everything but the shared, immutable [`EdgeTable`].
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    store: Bitmap,
    edge_colors: Vec<char>,
    table: Arc<EdgeTable>,
    coefficient: Coefficient,
    factors: Vec<i32>,
}

impl Graph {
    /// Creates an edgeless diagram whose first `root_count` nodes are roots.
    pub fn new(node_count: usize, root_count: usize) -> Result<Self, MayerError> {
        Self::from_store(node_count, root_count, Bitmap::new(edge_capacity(node_count)))
    }

    /// Creates a diagram over an existing edge store.
    pub fn from_store(
        node_count: usize,
        root_count: usize,
        store: Bitmap,
    ) -> Result<Self, MayerError> {
        check_node_count(node_count)?;
        if root_count > node_count {
            return Err(MayerError::graph(
                "root-count",
                "root count exceeds the node count",
            )
            .with_context("roots", root_count)
            .with_context("nodes", node_count));
        }
        let nodes = default_nodes(node_count, root_count);
        Self::from_parts(Arc::new(EdgeTable::new(node_count)), nodes, store)
    }

    /// Creates an edgeless diagram over explicit nodes; ids must be `0..n` in order.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self, MayerError> {
        check_node_count(nodes.len())?;
        let table = Arc::new(EdgeTable::new(nodes.len()));
        let store = Bitmap::new(table.capacity());
        Self::from_parts(table, nodes, store)
    }

    /// Assembles a diagram from a shared edge table, nodes and store.
    pub fn from_parts(
        table: Arc<EdgeTable>,
        nodes: Vec<Node>,
        store: Bitmap,
    ) -> Result<Self, MayerError> {
        check_node_count(nodes.len())?;
        if let Some((pos, node)) = nodes.iter().enumerate().find(|(pos, n)| n.id != *pos) {
            return Err(MayerError::graph("node-ids", "node ids must be dense and ordered")
                .with_context("position", pos)
                .with_context("id", node.id));
        }
        if table.node_count() != nodes.len() {
            return Err(MayerError::graph(
                "edge-table",
                "edge table was built for another node count",
            )
            .with_context("table", table.node_count())
            .with_context("nodes", nodes.len()));
        }
        if store.bit_size() != table.capacity() {
            return Err(MayerError::graph(
                "store-size",
                "edge store size must equal n(n-1)/2",
            )
            .with_context("bit_size", store.bit_size())
            .with_context("expected", table.capacity()));
        }
        Ok(Self {
            edge_colors: vec![DEFAULT_COLOR; table.capacity()],
            nodes,
            store,
            table,
            coefficient: Coefficient::one(),
            factors: Vec::new(),
        })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of root nodes.
    pub fn root_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_root()).count()
    }

    /// Number of field nodes.
    pub fn field_count(&self) -> usize {
        self.node_count() - self.root_count()
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: usize) -> Result<&Node, MayerError> {
        self.nodes.get(id).ok_or_else(|| unknown_node(id))
    }

    /// Recolors a node.
    pub fn set_node_color(&mut self, id: usize, color: char) -> Result<(), MayerError> {
        let node = self.nodes.get_mut(id).ok_or_else(|| unknown_node(id))?;
        node.color = color;
        Ok(())
    }

    /// The edge store.
    pub fn store(&self) -> &Bitmap {
        &self.store
    }

    /// The shared pair/edge-id table.
    pub fn table(&self) -> &Arc<EdgeTable> {
        &self.table
    }

    /// Edge id of the pair `(from, to)`, in either order.
    pub fn edge_id(&self, from: usize, to: usize) -> Result<EdgeId, MayerError> {
        self.node(from)?;
        self.node(to)?;
        self.table.edge_id(from, to).ok_or_else(|| {
            MayerError::graph("self-loop", "edges join two distinct nodes").with_context("node", from)
        })
    }

    /// Endpoints `(from, to)`, `from < to`, of an edge id.
    pub fn endpoints(&self, edge: EdgeId) -> Result<(usize, usize), MayerError> {
        self.table.endpoints(edge).ok_or_else(|| {
            MayerError::graph("unknown-edge", "edge id outside the table")
                .with_context("edge", edge.as_raw())
        })
    }

    /// Returns whether `from` and `to` are adjacent. Self pairs and unknown nodes are never adjacent.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.table
            .edge_id(from, to)
            .map_or(false, |edge| self.has_edge_id(edge))
    }

    /// Returns whether the edge with the given id is present.
    pub fn has_edge_id(&self, edge: EdgeId) -> bool {
        self.store.test_bit(edge.index()).unwrap_or(false)
    }

    /// Adds the edge `(from, to)` with the default color.
    pub fn put_edge(&mut self, from: usize, to: usize) -> Result<EdgeId, MayerError> {
        self.put_colored_edge(from, to, DEFAULT_COLOR)
    }

    /// Adds the edge `(from, to)` with the given color.
    pub fn put_colored_edge(
        &mut self,
        from: usize,
        to: usize,
        color: char,
    ) -> Result<EdgeId, MayerError> {
        let edge = self.edge_id(from, to)?;
        self.store.set_bit(edge.index())?;
        self.edge_colors[edge.index()] = color;
        Ok(edge)
    }

    /// Removes the edge `(from, to)`; removing an absent edge is a no-op.
    pub fn delete_edge(&mut self, from: usize, to: usize) -> Result<(), MayerError> {
        let edge = self.edge_id(from, to)?;
        self.store.clear_bit(edge.index())?;
        self.edge_colors[edge.index()] = DEFAULT_COLOR;
        Ok(())
    }

    /// Color of the edge `(from, to)` if present.
    pub fn edge_color(&self, from: usize, to: usize) -> Option<char> {
        let edge = self.table.edge_id(from, to)?;
        self.has_edge_id(edge).then(|| self.edge_colors[edge.index()])
    }

    /// Recolors an existing edge.
    pub fn set_edge_color(&mut self, from: usize, to: usize, color: char) -> Result<(), MayerError> {
        let edge = self.edge_id(from, to)?;
        if !self.has_edge_id(edge) {
            return Err(MayerError::graph("missing-edge", "cannot color an absent edge")
                .with_context("from", from)
                .with_context("to", to));
        }
        self.edge_colors[edge.index()] = color;
        Ok(())
    }

    /// Number of present edges (population count of the store).
    pub fn edge_count(&self) -> usize {
        self.store.bit_count()
    }

    /// Present edges in edge id order.
    pub fn edges(&self) -> Vec<Edge> {
        self.store
            .ones()
            .filter_map(|bit| {
                let id = EdgeId::from_raw(bit as u32);
                let (from, to) = self.table.endpoints(id)?;
                Some(Edge {
                    id,
                    from,
                    to,
                    color: self.edge_colors[bit],
                })
            })
            .collect()
    }

    /// Number of neighbors of `node` (zero for unknown nodes).
    pub fn out_degree(&self, node: usize) -> usize {
        (0..self.node_count())
            .filter(|other| self.has_edge(node, *other))
            .count()
    }

    /// The `index`-th neighbor of `node` in increasing id order.
    pub fn out_node(&self, node: usize, index: usize) -> Option<usize> {
        (0..self.node_count())
            .filter(|other| self.has_edge(node, *other))
            .nth(index)
    }

    /// Neighbors of `node` as a set.
    pub fn neighbors(&self, node: usize) -> NodeSet {
        (0..self.node_count())
            .filter(|other| self.has_edge(node, *other))
            .collect()
    }

    /// Neighbor sets of every node, indexed by node id.
    pub fn adjacency(&self) -> Vec<NodeSet> {
        let mut rows = vec![NodeSet::empty(); self.node_count()];
        for bit in self.store.ones() {
            if let Some((from, to)) = self.table.endpoints(EdgeId::from_raw(bit as u32)) {
                rows[from].insert(to);
                rows[to].insert(from);
            }
        }
        rows
    }

    /// Diagram weight.
    pub fn coefficient(&self) -> &Coefficient {
        &self.coefficient
    }

    /// Replaces the diagram weight.
    pub fn set_coefficient(&mut self, coefficient: Coefficient) {
        self.coefficient = coefficient;
    }

    /// Exponents of the auxiliary weighting factors.
    pub fn factors(&self) -> &[i32] {
        &self.factors
    }

    /// Resets the factor vector to `count` zeros.
    pub fn set_num_factors(&mut self, count: usize) {
        self.factors = vec![0; count];
    }

    /// Adds `delta` component-wise to the factor vector.
    pub fn add_factors(&mut self, delta: &[i32]) -> Result<(), MayerError> {
        if delta.len() != self.factors.len() {
            return Err(MayerError::graph("factor-length", "incorrect factor length")
                .with_context("expected", self.factors.len())
                .with_context("found", delta.len()));
        }
        for (factor, d) in self.factors.iter_mut().zip(delta) {
            *factor += d;
        }
        Ok(())
    }

    /// Returns the diagram obtained by moving node `i` to id `permutation[i]`.
    ///
    /// Node kinds and colors travel with their nodes, edge colors with their
    /// edges; coefficient and factors are copied unchanged.
    pub fn relabel(&self, permutation: &[usize]) -> Result<Graph, MayerError> {
        let n = self.node_count();
        let targets: NodeSet = permutation.iter().copied().filter(|t| *t < n).collect();
        if permutation.len() != n || targets.len() != n {
            return Err(MayerError::graph(
                "invalid-permutation",
                "relabeling requires a permutation of the node ids",
            )
            .with_context("nodes", n)
            .with_context("length", permutation.len()));
        }
        let mut nodes = self.nodes.clone();
        for (old, node) in self.nodes.iter().enumerate() {
            nodes[permutation[old]] = Node::new(permutation[old], node.kind, node.color);
        }
        let mut relabeled = Graph::from_parts(
            Arc::clone(&self.table),
            nodes,
            Bitmap::new(self.table.capacity()),
        )?;
        for edge in self.edges() {
            relabeled.put_colored_edge(permutation[edge.from], permutation[edge.to], edge.color)?;
        }
        relabeled.coefficient = self.coefficient;
        relabeled.factors = self.factors.clone();
        Ok(relabeled)
    }

    /// Structural signature: component count, factors, root count, field color
    /// degree lists and edge color counts.
    ///
    /// Layout: `/CC<k>[/Fac(f0,f1,..)]/R<roots>/F<color>:<deg>..../E<color><count>..`.
    /// Isomorphic diagrams share a signature; the converse does not hold.
    pub fn signature(&self) -> String {
        let mut result = String::new();
        if !self.factors.is_empty() {
            let joined: Vec<String> = self.factors.iter().map(|f| f.to_string()).collect();
            result.push_str(&format!("/Fac({})", joined.join(",")));
        }
        result.push_str(&format!("/R{}", self.root_count()));
        let adjacency = self.adjacency();
        let mut by_color: std::collections::BTreeMap<char, Vec<usize>> = Default::default();
        for node in &self.nodes {
            by_color
                .entry(node.color)
                .or_default()
                .push(adjacency[node.id].len());
        }
        result.push_str("/F");
        for (color, degrees) in &mut by_color {
            degrees.sort_unstable();
            result.push(*color);
            for degree in degrees.iter() {
                result.push_str(&format!(":{degree}"));
            }
        }
        let mut edge_colors: std::collections::BTreeMap<char, usize> = Default::default();
        for edge in self.edges() {
            *edge_colors.entry(edge.color).or_default() += 1;
        }
        result.push_str("/E");
        for (color, count) in edge_colors {
            result.push_str(&format!("{color}{count}"));
        }
        let components = DepthFirst.traverse_all(self, &mut |_| {});
        format!("/CC{components}{result}")
    }

    fn colors_of_present_edges(&self) -> impl Iterator<Item = char> + '_ {
        self.store.ones().map(|bit| self.edge_colors[bit])
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Graph {}

impl Ord for Graph {
    /// Orders by node count, edge count, edge store, nodes, edge colors and
    /// finally coefficient.
    fn cmp(&self, other: &Self) -> Ordering {
        self.node_count()
            .cmp(&other.node_count())
            .then_with(|| self.edge_count().cmp(&other.edge_count()))
            .then_with(|| self.store.cmp(&other.store))
            .then_with(|| self.nodes.cmp(&other.nodes))
            .then_with(|| {
                self.colors_of_present_edges()
                    .cmp(other.colors_of_present_edges())
            })
            .then_with(|| self.coefficient.cmp(&other.coefficient))
    }
}

impl PartialOrd for Graph {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coefficient)?;
        if !self.factors.is_empty() {
            let joined: Vec<String> = self.factors.iter().map(|v| v.to_string()).collect();
            write!(f, "({})", joined.join(","))?;
        }
        let nodes: Vec<String> = self.nodes.iter().map(|n| n.to_string()).collect();
        write!(f, " :: [{}] :: {{", nodes.join(", "))?;
        for (idx, edge) in self.edges().iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({},{}){}", edge.from, edge.to, edge.color)?;
        }
        write!(f, "}}")
    }
}

pub(crate) fn default_nodes(node_count: usize, root_count: usize) -> Vec<Node> {
    (0..node_count)
        .map(|id| {
            if id < root_count {
                Node::root(id)
            } else {
                Node::field(id)
            }
        })
        .collect()
}

fn check_node_count(node_count: usize) -> Result<(), MayerError> {
    if node_count > MAX_NODE_COUNT {
        return Err(
            MayerError::graph("too-many-nodes", "diagram exceeds the supported node count")
                .with_context("nodes", node_count)
                .with_context("max", MAX_NODE_COUNT),
        );
    }
    Ok(())
}

fn unknown_node(id: usize) -> MayerError {
    MayerError::graph("unknown-node", "node does not exist").with_context("node", id)
}
