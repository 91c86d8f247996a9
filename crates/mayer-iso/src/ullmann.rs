use mayer_graph::NodeSet;

use crate::context::MatchContext;
use crate::state::{Core, NodePair, SearchState};

/// Ullmann-style search over a candidate matrix.
///
/// Row `u` of the matrix holds the nodes of the second diagram that node `u`
/// of the first may still map to. Every added pair prunes the matrix and a
/// neighborhood refinement runs to a fixed point; snapshots restore it on
/// backtrack.
#[derive(Debug, Clone)]
pub struct UllmannState<'a> {
    context: &'a MatchContext,
    core: Core,
    candidates: Vec<NodeSet>,
    saved: Vec<Vec<NodeSet>>,
    used_second: NodeSet,
}

impl<'a> UllmannState<'a> {
    /// Starts from the label- and degree-compatible candidate matrix.
    pub fn new(context: &'a MatchContext) -> Self {
        let node_count = context.node_count();
        let candidates = (0..node_count)
            .map(|n1| {
                (0..node_count)
                    .filter(|&n2| context.compatible(n1, n2))
                    .collect()
            })
            .collect();
        let mut state = Self {
            context,
            core: Core::new(node_count),
            candidates,
            saved: Vec::new(),
            used_second: NodeSet::empty(),
        };
        state.refine();
        state
    }

    // Unmapped first-diagram node with the fewest candidates, lowest id on ties.
    fn select(&self) -> Option<usize> {
        (0..self.core.node_count())
            .filter(|&n1| self.core.image(n1).is_none())
            .min_by_key(|&n1| (self.candidates[n1].len(), n1))
    }

    fn refine(&mut self) {
        let first = &self.context.first;
        let second = &self.context.second;
        let mut changed = true;
        while changed {
            changed = false;
            for u1 in 0..self.core.node_count() {
                if self.core.image(u1).is_some() {
                    continue;
                }
                for u2 in self.candidates[u1] {
                    let supported = first.adjacency[u1].iter().all(|x| {
                        !second.adjacency[u2]
                            .intersection(&self.candidates[x])
                            .is_empty()
                    });
                    if !supported {
                        self.candidates[u1].remove(u2);
                        changed = true;
                    }
                }
            }
        }
    }
}

impl SearchState for UllmannState<'_> {
    fn next_pair(&self, prev: Option<NodePair>) -> Option<NodePair> {
        let (first, from) = match prev {
            Some(pair) => (pair.first, pair.second + 1),
            None => (self.select()?, 0),
        };
        self.candidates[first]
            .difference(&self.used_second)
            .first_from(from)
            .map(|second| NodePair::new(first, second))
    }

    fn is_feasible_pair(&self, pair: NodePair) -> bool {
        self.candidates[pair.first].contains(pair.second)
            && self.core.is_free(pair)
            && self
                .context
                .core_consistent(pair.first, pair.second, self.core.pairs())
    }

    fn add_pair(&mut self, pair: NodePair) {
        self.saved.push(self.candidates.clone());
        self.core.push(pair);
        self.used_second.insert(pair.second);
        let first = &self.context.first;
        let second = &self.context.second;
        for u1 in 0..self.core.node_count() {
            if u1 == pair.first {
                self.candidates[u1] = NodeSet::from_iter([pair.second]);
                continue;
            }
            if self.core.image(u1).is_some() {
                continue;
            }
            let wanted = first.color(u1, pair.first);
            self.candidates[u1] = self.candidates[u1]
                .iter()
                .filter(|&u2| u2 != pair.second && second.color(u2, pair.second) == wanted)
                .collect();
        }
        self.refine();
    }

    fn back_track(&mut self) {
        if let Some(pair) = self.core.pop() {
            self.used_second.remove(pair.second);
        }
        if let Some(candidates) = self.saved.pop() {
            self.candidates = candidates;
        }
    }

    fn is_goal(&self) -> bool {
        self.core.len() == self.core.node_count()
    }

    fn is_dead(&self) -> bool {
        (0..self.core.node_count())
            .any(|n1| self.core.image(n1).is_none() && self.candidates[n1].is_empty())
    }

    fn core_len(&self) -> usize {
        self.core.len()
    }

    fn mapping(&self) -> Vec<Option<usize>> {
        self.core.mapping()
    }
}
