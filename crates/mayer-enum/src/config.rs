use std::collections::BTreeMap;
use std::path::Path;

use mayer_core::{MayerError, DEFAULT_COLOR, MAX_NODE_COUNT};
use mayer_iso::Strategy;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters of an enumeration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationConfig {
    /// Root node count per color.
    #[serde(default)]
    pub root_colors: BTreeMap<char, usize>,
    /// Field node count per color.
    #[serde(default = "default_field_colors")]
    pub field_colors: BTreeMap<char, usize>,
    /// Yield one representative per isomorphism class.
    #[serde(default = "default_iso_free")]
    pub iso_free: bool,
    /// Matching strategy used for deduplication.
    #[serde(default)]
    pub strategy: Strategy,
    /// Structural filter applied before deduplication.
    #[serde(default)]
    pub filter: FilterKind,
}

fn default_field_colors() -> BTreeMap<char, usize> {
    BTreeMap::from([(DEFAULT_COLOR, 4)])
}

fn default_iso_free() -> bool {
    true
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            root_colors: BTreeMap::new(),
            field_colors: default_field_colors(),
            iso_free: default_iso_free(),
            strategy: Strategy::default(),
            filter: FilterKind::default(),
        }
    }
}

/// Structural filters selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Keep everything.
    #[default]
    None,
    /// Keep connected diagrams.
    Connected,
    /// Keep biconnected diagrams.
    Biconnected,
}

impl EnumerationConfig {
    /// Config for `field_count` default-colored field nodes.
    pub fn fields(field_count: usize) -> Self {
        Self {
            field_colors: BTreeMap::from([(DEFAULT_COLOR, field_count)]),
            ..Self::default()
        }
    }

    /// Total node count.
    pub fn node_count(&self) -> usize {
        self.root_count() + self.field_colors.values().sum::<usize>()
    }

    /// Root node count.
    pub fn root_count(&self) -> usize {
        self.root_colors.values().sum()
    }

    /// Checks partition counts and the node bound.
    pub fn validate(&self) -> Result<(), MayerError> {
        let partitions = self.root_colors.iter().chain(self.field_colors.iter());
        if let Some((color, _)) = partitions.into_iter().find(|(_, count)| **count == 0) {
            return Err(MayerError::config(
                "empty-partition",
                "color partitions must hold at least one node",
            )
            .with_context("color", color));
        }
        let node_count = self.node_count();
        if node_count == 0 {
            return Err(MayerError::config(
                "no-nodes",
                "enumeration requires at least one node",
            ));
        }
        if node_count > MAX_NODE_COUNT {
            return Err(MayerError::config(
                "too-many-nodes",
                "enumeration exceeds the supported node count",
            )
            .with_context("nodes", node_count)
            .with_context("max", MAX_NODE_COUNT));
        }
        Ok(())
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MayerError> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|err| MayerError::serde("yaml-deserialize", err))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, MayerError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|err| {
            MayerError::config("config-io", err.to_string())
                .with_context("path", path.display())
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Renders the config as YAML.
    pub fn to_yaml_string(&self) -> Result<String, MayerError> {
        serde_yaml::to_string(self).map_err(|err| MayerError::serde("yaml-serialize", err))
    }
}
