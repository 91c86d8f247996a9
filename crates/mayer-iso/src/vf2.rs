use mayer_graph::NodeSet;

use crate::context::MatchContext;
use crate::state::{Core, NodePair, SearchState};

/// VF2 search.
///
/// Same candidate order and look-ahead as VF, but terminal membership is kept
/// in depth-stamped arrays: a node enters at the depth of the pair that first
/// touched it and leaves when that pair is undone, so no set is ever rebuilt.
#[derive(Debug, Clone)]
pub struct Vf2State<'a> {
    context: &'a MatchContext,
    core: Core,
    // 0 = untouched, otherwise depth at which the node entered core or terminal
    in_first: Vec<usize>,
    in_second: Vec<usize>,
    touched_first: usize,
    touched_second: usize,
}

impl<'a> Vf2State<'a> {
    /// Starts from the empty mapping.
    pub fn new(context: &'a MatchContext) -> Self {
        let node_count = context.node_count();
        Self {
            context,
            core: Core::new(node_count),
            in_first: vec![0; node_count],
            in_second: vec![0; node_count],
            touched_first: 0,
            touched_second: 0,
        }
    }

    fn terminal_open(&self) -> bool {
        self.touched_first > self.core.len() && self.touched_second > self.core.len()
    }

    fn first_candidate(&self) -> Option<usize> {
        let terminal = self.terminal_open();
        (0..self.core.node_count()).find(|&n1| {
            self.core.image(n1).is_none() && (!terminal || self.in_first[n1] != 0)
        })
    }

    fn stamp(stamps: &mut [usize], touched: &mut usize, node: usize, depth: usize) {
        if stamps[node] == 0 {
            stamps[node] = depth;
            *touched += 1;
        }
    }

    fn unstamp(stamps: &mut [usize], touched: &mut usize, node: usize, depth: usize) {
        if stamps[node] == depth {
            stamps[node] = 0;
            *touched -= 1;
        }
    }
}

// Unmapped neighbors counted as (terminal, untouched).
fn split(neighbors: NodeSet, stamps: &[usize], mapped: impl Fn(usize) -> bool) -> (usize, usize) {
    neighbors
        .iter()
        .filter(|&node| !mapped(node))
        .fold((0, 0), |(terminal, fresh), node| {
            if stamps[node] != 0 {
                (terminal + 1, fresh)
            } else {
                (terminal, fresh + 1)
            }
        })
}

impl SearchState for Vf2State<'_> {
    fn next_pair(&self, prev: Option<NodePair>) -> Option<NodePair> {
        let (first, from) = match prev {
            Some(pair) => (pair.first, pair.second + 1),
            None => (self.first_candidate()?, 0),
        };
        let terminal = self.terminal_open();
        (from..self.core.node_count())
            .find(|&n2| {
                self.core.preimage(n2).is_none() && (!terminal || self.in_second[n2] != 0)
            })
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
        let first = split(
            self.context.first.adjacency[pair.first],
            &self.in_first,
            |node| self.core.image(node).is_some(),
        );
        let second = split(
            self.context.second.adjacency[pair.second],
            &self.in_second,
            |node| self.core.preimage(node).is_some(),
        );
        first == second
    }

    fn add_pair(&mut self, pair: NodePair) {
        self.core.push(pair);
        let depth = self.core.len();
        Self::stamp(&mut self.in_first, &mut self.touched_first, pair.first, depth);
        Self::stamp(&mut self.in_second, &mut self.touched_second, pair.second, depth);
        for neighbor in self.context.first.adjacency[pair.first] {
            Self::stamp(&mut self.in_first, &mut self.touched_first, neighbor, depth);
        }
        for neighbor in self.context.second.adjacency[pair.second] {
            Self::stamp(&mut self.in_second, &mut self.touched_second, neighbor, depth);
        }
    }

    fn back_track(&mut self) {
        let depth = self.core.len();
        let Some(pair) = self.core.pop() else {
            return;
        };
        Self::unstamp(&mut self.in_first, &mut self.touched_first, pair.first, depth);
        Self::unstamp(&mut self.in_second, &mut self.touched_second, pair.second, depth);
        for neighbor in self.context.first.adjacency[pair.first] {
            Self::unstamp(&mut self.in_first, &mut self.touched_first, neighbor, depth);
        }
        for neighbor in self.context.second.adjacency[pair.second] {
            Self::unstamp(&mut self.in_second, &mut self.touched_second, neighbor, depth);
        }
    }

    fn is_goal(&self) -> bool {
        self.core.len() == self.core.node_count()
    }

    fn is_dead(&self) -> bool {
        self.touched_first != self.touched_second
    }

    fn core_len(&self) -> usize {
        self.core.len()
    }

    fn mapping(&self) -> Vec<Option<usize>> {
        self.core.mapping()
    }
}
