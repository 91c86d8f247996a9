//! The search-state contract shared by every matching strategy and the
//! backtracking driver that runs any of them.

use serde::{Deserialize, Serialize};

/// Candidate correspondence between a node of the first diagram and a node of
/// the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePair {
    /// Node of the first diagram.
    pub first: usize,
    /// Node of the second diagram.
    pub second: usize,
}

impl NodePair {
    /// Creates a pair.
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }
}

/// Partial mapping under construction by a matching strategy.
pub trait SearchState {
    /// Next candidate after `prev` at the current depth, or the first one when
    /// `prev` is `None`. Candidates come in a fixed deterministic order.
    fn next_pair(&self, prev: Option<NodePair>) -> Option<NodePair>;

    /// Whether `pair` can extend the current mapping.
    fn is_feasible_pair(&self, pair: NodePair) -> bool;

    /// Extends the mapping with a feasible pair.
    fn add_pair(&mut self, pair: NodePair);

    /// Undoes the most recent [`SearchState::add_pair`].
    fn back_track(&mut self);

    /// Every node is mapped.
    fn is_goal(&self) -> bool;

    /// The current mapping cannot be completed.
    fn is_dead(&self) -> bool;

    /// Number of mapped pairs.
    fn core_len(&self) -> usize;

    /// Image in the second diagram of each node of the first, `None` while
    /// unmapped.
    fn mapping(&self) -> Vec<Option<usize>>;
}

/// Mapped pairs in both directions plus the order they were added in.
#[derive(Debug, Clone)]
pub(crate) struct Core {
    first: Vec<Option<usize>>,
    second: Vec<Option<usize>>,
    pairs: Vec<NodePair>,
}

impl Core {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            first: vec![None; node_count],
            second: vec![None; node_count],
            pairs: Vec::with_capacity(node_count),
        }
    }

    pub(crate) fn push(&mut self, pair: NodePair) {
        self.first[pair.first] = Some(pair.second);
        self.second[pair.second] = Some(pair.first);
        self.pairs.push(pair);
    }

    pub(crate) fn pop(&mut self) -> Option<NodePair> {
        let pair = self.pairs.pop()?;
        self.first[pair.first] = None;
        self.second[pair.second] = None;
        Some(pair)
    }

    pub(crate) fn is_free(&self, pair: NodePair) -> bool {
        self.first[pair.first].is_none() && self.second[pair.second].is_none()
    }

    pub(crate) fn image(&self, first: usize) -> Option<usize> {
        self.first[first]
    }

    pub(crate) fn preimage(&self, second: usize) -> Option<usize> {
        self.second[second]
    }

    pub(crate) fn len(&self) -> usize {
        self.pairs.len()
    }

    pub(crate) fn node_count(&self) -> usize {
        self.first.len()
    }

    pub(crate) fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().map(|pair| (pair.first, pair.second))
    }

    pub(crate) fn mapping(&self) -> Vec<Option<usize>> {
        self.first.clone()
    }
}

/// Depth-first backtracking over any [`SearchState`], without recursion.
///
/// Returns `true` once a goal state is reached; the state then holds the
/// complete mapping.
pub fn run_match<S: SearchState + ?Sized>(state: &mut S) -> bool {
    if state.is_goal() {
        return true;
    }
    if state.is_dead() {
        return false;
    }
    // last candidate tried at each depth
    let mut trail: Vec<Option<NodePair>> = vec![None];
    while let Some(prev) = trail.last_mut() {
        match state.next_pair(*prev) {
            Some(pair) => {
                *prev = Some(pair);
                if !state.is_feasible_pair(pair) {
                    continue;
                }
                state.add_pair(pair);
                if state.is_goal() {
                    return true;
                }
                if state.is_dead() {
                    state.back_track();
                } else {
                    trail.push(None);
                }
            }
            None => {
                trail.pop();
                if !trail.is_empty() {
                    state.back_track();
                }
            }
        }
    }
    false
}
