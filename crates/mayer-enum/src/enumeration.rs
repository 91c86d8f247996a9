use mayer_core::MayerError;
use mayer_graph::{Graph, IsBiconnected, IsConnected};
use mayer_iso::IsomorphismEngine;
use tracing::debug;

use crate::config::{EnumerationConfig, FilterKind};
use crate::iterators::{IsoFreeIterator, PartitionedIterator, PropertyFilter};

/// A validated enumeration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    config: EnumerationConfig,
}

impl Enumeration {
    /// Validates `config`.
    pub fn from_config(config: EnumerationConfig) -> Result<Self, MayerError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The underlying config.
    pub fn config(&self) -> &EnumerationConfig {
        &self.config
    }

    /// Lazily enumerates the configured diagrams: partitioned walk, then the
    /// filter, then deduplication when enabled.
    pub fn iter(&self) -> Result<Box<dyn Iterator<Item = Graph>>, MayerError> {
        let base = PartitionedIterator::new(&self.config.root_colors, &self.config.field_colors)?;
        let filtered: Box<dyn Iterator<Item = Graph>> = match self.config.filter {
            FilterKind::None => Box::new(base),
            FilterKind::Connected => Box::new(PropertyFilter::new(base, IsConnected)),
            FilterKind::Biconnected => Box::new(PropertyFilter::new(base, IsBiconnected)),
        };
        if !self.config.iso_free {
            return Ok(filtered);
        }
        let engine = IsomorphismEngine::new(self.config.strategy);
        Ok(Box::new(IsoFreeIterator::new(filtered, engine)))
    }

    /// Runs the enumeration to completion.
    pub fn run(&self) -> Result<Vec<Graph>, MayerError> {
        debug!(
            nodes = self.config.node_count(),
            roots = self.config.root_count(),
            iso_free = self.config.iso_free,
            strategy = %self.config.strategy,
            filter = ?self.config.filter,
            "enumeration started"
        );
        let graphs: Vec<Graph> = self.iter()?.collect();
        debug!(count = graphs.len(), "enumeration finished");
        Ok(graphs)
    }

    /// Counts the diagrams without keeping them.
    pub fn count(&self) -> Result<usize, MayerError> {
        let count = self.iter()?.count();
        debug!(count, "enumeration counted");
        Ok(count)
    }
}
