#![deny(missing_docs)]

//! Enumeration of Mayer diagrams: every edge pattern over fixed node
//! partitions, optionally filtered by a structural property and reduced to one
//! representative per isomorphism class.

mod config;
mod enumeration;
mod iterators;

pub use config::{EnumerationConfig, FilterKind};
pub use enumeration::Enumeration;
pub use iterators::{DefaultIterator, IsoFreeIterator, PartitionedIterator, PropertyFilter};
