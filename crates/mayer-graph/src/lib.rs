#![deny(missing_docs)]
#![doc = include_str!("../docs/graph-api.md")]

//! Labeled cluster diagrams over bit-packed edge stores.

pub mod bitmap;
mod biconnected;
mod coefficient;
mod edges;
mod generators;
mod graph;
mod hash;
mod node_set;
mod property;
mod serialization;
mod traversal;

pub use biconnected::{Biconnected, BlockReport};
pub use bitmap::{Bitmap, BitmapKind, Bitset};
pub use coefficient::Coefficient;
pub use edges::EdgeTable;
pub use generators::{
    gen_complete, gen_cycle, gen_path, gen_random, random_permutation, random_relabeling,
    sample_diagrams,
};
pub use graph::{Edge, Graph, Node};
pub use hash::structural_hash;
pub use node_set::{NodeSet, NodeSetIter};
pub use property::{
    has_articulation_pair, has_articulation_point, has_no_root_edge, has_nodal_point,
    is_biconnected, is_connected, HasArticulationPair, HasArticulationPoint, HasNoRootEdge,
    HasNodalPoint, IsBiconnected, IsConnected, Property,
};
pub use traversal::{
    collect_events, BreadthFirst, DepthFirst, Traversal, TraversalError, TraversalEvent, Visitor,
};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json, GRAPH_SCHEMA};
