#![deny(missing_docs)]
#![doc = "Core identifiers, error surface and deterministic helpers shared by the Mayer diagram crates."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, MayerError};
pub use provenance::SchemaVersion;
pub use rng::{derive_substream_seed, RngHandle};

/// Largest number of nodes a diagram may carry.
///
/// Node sets are stored as `u128` masks throughout the engine, which bounds
/// diagrams to 128 nodes (8128 potential edges).
pub const MAX_NODE_COUNT: usize = 128;

/// Color assigned to nodes and edges when the caller does not pick one.
pub const DEFAULT_COLOR: char = 'A';

/// Identifier for a potential edge (an unordered node pair) of a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(u32);

impl EdgeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u32 {
        self.0
    }

    /// Returns the identifier as a bit index into an edge store.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Distinguishes the two categories of diagram nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Fixed external point of the diagram.
    Root,
    /// Internal point integrated over.
    Field,
}

impl NodeKind {
    /// Returns the single-letter tag used in signatures and string output.
    pub fn tag(&self) -> char {
        match self {
            NodeKind::Root => 'R',
            NodeKind::Field => 'F',
        }
    }
}

/// Returns the number of potential edges of a diagram with `node_count` nodes.
pub const fn edge_capacity(node_count: usize) -> usize {
    node_count * node_count.saturating_sub(1) / 2
}
