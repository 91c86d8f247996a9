use mayer_core::{edge_capacity, EdgeId};

/// Bijection between unordered node pairs and edge ids for one node count.
///
/// Ids follow rings of increasing span: first the `n` edges `(0,1), (1,2),
/// .., (n-1,0)`, then `(0,2), (1,3), ..`, and so on. Built once per node
/// count and shared between every diagram of that size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeTable {
    node_count: usize,
    ids: Vec<u32>,
    ends: Vec<(usize, usize)>,
}

const NO_EDGE: u32 = u32::MAX;

impl EdgeTable {
    /// Builds the table for `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        let capacity = edge_capacity(node_count);
        let mut ids = vec![NO_EDGE; node_count * node_count];
        let mut ends = vec![(0, 0); capacity];
        for from in 0..node_count {
            for to in (from + 1)..node_count {
                let id = ring_id(node_count, from, to);
                ids[from * node_count + to] = id as u32;
                ids[to * node_count + from] = id as u32;
                ends[id] = (from, to);
            }
        }
        Self {
            node_count,
            ids,
            ends,
        }
    }

    /// Number of nodes the table was built for.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of potential edges.
    pub fn capacity(&self) -> usize {
        self.ends.len()
    }

    /// Edge id for the pair, in either order; `None` for self pairs or unknown nodes.
    pub fn edge_id(&self, a: usize, b: usize) -> Option<EdgeId> {
        if a >= self.node_count || b >= self.node_count {
            return None;
        }
        match self.ids[a * self.node_count + b] {
            NO_EDGE => None,
            raw => Some(EdgeId::from_raw(raw)),
        }
    }

    /// Endpoints `(from, to)` with `from < to`.
    pub fn endpoints(&self, edge: EdgeId) -> Option<(usize, usize)> {
        self.ends.get(edge.index()).copied()
    }
}

fn ring_id(node_count: usize, from: usize, to: usize) -> usize {
    let mut diff = to - from;
    let mut start = from;
    if diff > node_count / 2 {
        // wrap around: (0, n-1) is the ring edge starting at n-1
        diff = node_count - diff;
        start = to;
    }
    (diff - 1) * node_count + start
}
