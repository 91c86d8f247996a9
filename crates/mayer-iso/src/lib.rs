#![deny(missing_docs)]
#![doc = include_str!("../docs/matching.md")]

//! Isomorphism testing for Mayer diagrams.

mod context;
mod engine;
mod invariants;
mod state;
mod ullmann;
mod vf;
mod vf2;

pub use context::MatchContext;
pub use engine::{IsomorphismEngine, Strategy};
pub use invariants::{prematch, GraphInvariants, Mismatch};
pub use state::{run_match, NodePair, SearchState};
pub use ullmann::UllmannState;
pub use vf::VfState;
pub use vf2::Vf2State;
