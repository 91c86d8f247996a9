use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use mayer_core::{MayerError, NodeKind};
use mayer_graph::{Bitmap, Bitset, EdgeTable, Graph, Node, Property};
use mayer_iso::{GraphInvariants, IsomorphismEngine};
use tracing::trace;

/// Every edge pattern over a fixed node list, in increasing store order.
///
/// Yields `2^(n(n-1)/2)` diagrams, from the edgeless one to the complete one.
/// All yielded diagrams share one [`EdgeTable`].
#[derive(Debug, Clone)]
pub struct DefaultIterator {
    table: Arc<EdgeTable>,
    nodes: Vec<Node>,
    store: Option<Bitmap>,
}

impl DefaultIterator {
    /// Walks diagrams with `node_count` nodes whose first `root_count` are roots.
    pub fn new(node_count: usize, root_count: usize) -> Result<Self, MayerError> {
        let template = Graph::new(node_count, root_count)?;
        Self::with_nodes(template.nodes().to_vec())
    }

    /// Walks diagrams over explicit nodes.
    pub fn with_nodes(nodes: Vec<Node>) -> Result<Self, MayerError> {
        let template = Graph::from_nodes(nodes)?;
        Ok(Self {
            table: Arc::clone(template.table()),
            store: Some(Bitmap::new(template.table().capacity())),
            nodes: template.nodes().to_vec(),
        })
    }

    /// Number of nodes per yielded diagram.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Iterator for DefaultIterator {
    type Item = Graph;

    fn next(&mut self) -> Option<Graph> {
        let store = self.store.take()?;
        let mut following = store.clone();
        if following.inc() {
            self.store = Some(following);
        }
        Graph::from_parts(Arc::clone(&self.table), self.nodes.clone(), store).ok()
    }
}

/// [`DefaultIterator`] over nodes colored by fixed partitions.
///
/// Roots come first, then field nodes; within each kind colors are laid out
/// in ascending order.
#[derive(Debug, Clone)]
pub struct PartitionedIterator {
    inner: DefaultIterator,
}

impl PartitionedIterator {
    /// Builds the node list from per-color counts.
    pub fn new(
        root_colors: &BTreeMap<char, usize>,
        field_colors: &BTreeMap<char, usize>,
    ) -> Result<Self, MayerError> {
        let kinds = [(NodeKind::Root, root_colors), (NodeKind::Field, field_colors)];
        let mut nodes = Vec::new();
        for (kind, partition) in kinds {
            for (&color, &count) in partition {
                for _ in 0..count {
                    nodes.push(Node::new(nodes.len(), kind, color));
                }
            }
        }
        Ok(Self {
            inner: DefaultIterator::with_nodes(nodes)?,
        })
    }

    /// Number of nodes per yielded diagram.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }
}

impl Iterator for PartitionedIterator {
    type Item = Graph;

    fn next(&mut self) -> Option<Graph> {
        self.inner.next()
    }
}

/// Yields only diagrams not isomorphic to one yielded before.
///
/// Accepted representatives are bucketed by [`GraphInvariants`], so a new
/// diagram is searched against those sharing its invariants only.
#[derive(Debug)]
pub struct IsoFreeIterator<I> {
    inner: I,
    engine: IsomorphismEngine,
    buckets: HashMap<GraphInvariants, Vec<Graph>>,
    accepted: usize,
    seen: usize,
}

impl<I: Iterator<Item = Graph>> IsoFreeIterator<I> {
    /// Deduplicates `inner` with `engine`.
    pub fn new(inner: I, engine: IsomorphismEngine) -> Self {
        Self {
            inner,
            engine,
            buckets: HashMap::new(),
            accepted: 0,
            seen: 0,
        }
    }

    /// Representatives yielded so far.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Diagrams pulled from the wrapped iterator so far.
    pub fn seen(&self) -> usize {
        self.seen
    }
}

impl<I: Iterator<Item = Graph>> Iterator for IsoFreeIterator<I> {
    type Item = Graph;

    fn next(&mut self) -> Option<Graph> {
        for graph in self.inner.by_ref() {
            self.seen += 1;
            let bucket = self.buckets.entry(GraphInvariants::of(&graph)).or_default();
            if bucket
                .iter()
                .any(|rep| self.engine.search(rep, &graph).is_some())
            {
                continue;
            }
            bucket.push(graph.clone());
            self.accepted += 1;
            trace!(accepted = self.accepted, seen = self.seen, "new representative");
            return Some(graph);
        }
        None
    }
}

/// Keeps the diagrams that satisfy a [`Property`].
#[derive(Debug, Clone)]
pub struct PropertyFilter<I, P> {
    inner: I,
    property: P,
}

impl<I, P> PropertyFilter<I, P> {
    /// Wraps `inner`.
    pub fn new(inner: I, property: P) -> Self {
        Self { inner, property }
    }
}

impl<I, P> Iterator for PropertyFilter<I, P>
where
    I: Iterator<Item = Graph>,
    P: Property,
{
    type Item = Graph;

    fn next(&mut self) -> Option<Graph> {
        let property = &self.property;
        self.inner.by_ref().find(|graph| property.check(graph))
    }
}
