use mayer_graph::NodeSet;

use crate::context::MatchContext;
use crate::state::{Core, NodePair, SearchState};

/// VF search: candidates are drawn from the terminal sets (unmapped
/// neighbors of mapped nodes), recomputed from scratch at every step.
#[derive(Debug, Clone)]
pub struct VfState<'a> {
    context: &'a MatchContext,
    core: Core,
    used_first: NodeSet,
    used_second: NodeSet,
}

impl<'a> VfState<'a> {
    /// Starts from the empty mapping.
    pub fn new(context: &'a MatchContext) -> Self {
        Self {
            context,
            core: Core::new(context.node_count()),
            used_first: NodeSet::empty(),
            used_second: NodeSet::empty(),
        }
    }

    fn terminals(&self) -> (NodeSet, NodeSet) {
        (
            terminal(&self.context.first.adjacency, self.used_first),
            terminal(&self.context.second.adjacency, self.used_second),
        )
    }

    // Terminal sets when both are populated, otherwise every unmapped node.
    fn pools(&self) -> (NodeSet, NodeSet) {
        let (t1, t2) = self.terminals();
        if !t1.is_empty() && !t2.is_empty() {
            return (t1, t2);
        }
        let all = NodeSet::full(self.core.node_count());
        (all.difference(&self.used_first), all.difference(&self.used_second))
    }
}

fn terminal(adjacency: &[NodeSet], used: NodeSet) -> NodeSet {
    used.iter()
        .fold(NodeSet::empty(), |acc, node| acc.union(&adjacency[node]))
        .difference(&used)
}

impl SearchState for VfState<'_> {
    fn next_pair(&self, prev: Option<NodePair>) -> Option<NodePair> {
        let (pool1, pool2) = self.pools();
        let (first, from) = match prev {
            Some(pair) => (pair.first, pair.second + 1),
            None => (pool1.first()?, 0),
        };
        pool2
            .first_from(from)
            .map(|second| NodePair::new(first, second))
    }

    fn is_feasible_pair(&self, pair: NodePair) -> bool {
        let context = self.context;
        if !self.core.is_free(pair)
            || !context.compatible(pair.first, pair.second)
            || !context.core_consistent(pair.first, pair.second, self.core.pairs())
        {
            return false;
        }
        // look-ahead: unmapped neighbors split alike between terminal and new nodes
        let (t1, t2) = self.terminals();
        let open1 = context.first.adjacency[pair.first].difference(&self.used_first);
        let open2 = context.second.adjacency[pair.second].difference(&self.used_second);
        open1.intersection(&t1).len() == open2.intersection(&t2).len()
            && open1.difference(&t1).len() == open2.difference(&t2).len()
    }

    fn add_pair(&mut self, pair: NodePair) {
        self.core.push(pair);
        self.used_first.insert(pair.first);
        self.used_second.insert(pair.second);
    }

    fn back_track(&mut self) {
        if let Some(pair) = self.core.pop() {
            self.used_first.remove(pair.first);
            self.used_second.remove(pair.second);
        }
    }

    fn is_goal(&self) -> bool {
        self.core.len() == self.core.node_count()
    }

    fn is_dead(&self) -> bool {
        let (t1, t2) = self.terminals();
        t1.len() != t2.len()
    }

    fn core_len(&self) -> usize {
        self.core.len()
    }

    fn mapping(&self) -> Vec<Option<usize>> {
        self.core.mapping()
    }
}
