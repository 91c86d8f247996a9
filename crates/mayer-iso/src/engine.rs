use std::fmt;

use mayer_graph::Graph;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::context::MatchContext;
use crate::invariants::prematch;
use crate::state::{run_match, SearchState};
use crate::ullmann::UllmannState;
use crate::vf::VfState;
use crate::vf2::Vf2State;

/// Search strategy used after the pre-match filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Candidate matrix with neighborhood refinement.
    Ullmann,
    /// Terminal sets recomputed per step.
    Vf,
    /// Depth-stamped terminal arrays.
    #[default]
    Vf2,
}

impl Strategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Strategy; 3] = [Strategy::Ullmann, Strategy::Vf, Strategy::Vf2];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Strategy::Ullmann => "ullmann",
            Strategy::Vf => "vf",
            Strategy::Vf2 => "vf2",
        };
        f.write_str(label)
    }
}

/// Decides whether two diagrams are equal up to relabeling.
///
/// Relabelings must preserve node kind and color as well as edge presence and
/// color; coefficients and factors are ignored. Every pair that survives the
/// pre-match filter is settled by a complete backtracking search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsomorphismEngine {
    strategy: Strategy,
}

impl IsomorphismEngine {
    /// Creates an engine running `strategy`.
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    /// The configured strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Whether `first` and `second` are isomorphic.
    pub fn check_isomorphic(&self, first: &Graph, second: &Graph) -> bool {
        self.find_mapping(first, second).is_some()
    }

    /// An isomorphism as `mapping[node of first] = node of second`.
    pub fn find_mapping(&self, first: &Graph, second: &Graph) -> Option<Vec<usize>> {
        if let Err(mismatch) = prematch(first, second) {
            trace!(?mismatch, "pre-match rejected pair");
            return None;
        }
        self.search(first, second)
    }

    /// Runs the search without the pre-match filter.
    ///
    /// For callers that already compared [`crate::GraphInvariants`]; node
    /// counts must still agree.
    pub fn search(&self, first: &Graph, second: &Graph) -> Option<Vec<usize>> {
        if first.node_count() != second.node_count() {
            return None;
        }
        let context = MatchContext::new(first, second);
        let mapping = match self.strategy {
            Strategy::Ullmann => solve(UllmannState::new(&context)),
            Strategy::Vf => solve(VfState::new(&context)),
            Strategy::Vf2 => solve(Vf2State::new(&context)),
        };
        trace!(strategy = %self.strategy, found = mapping.is_some(), "search finished");
        mapping
    }
}

fn solve<S: SearchState>(mut state: S) -> Option<Vec<usize>> {
    if !run_match(&mut state) {
        return None;
    }
    state.mapping().into_iter().collect()
}
