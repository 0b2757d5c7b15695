//! Configuration for the network build.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::aggregation::AggregationRule;
use crate::algorithm::layout::LayoutConfig;
use crate::error::util::safe_open_file;
use crate::error::{NetworkError, Result};

/// Default number of providers kept in the rendered graph
pub const DEFAULT_MAX_DISPLAY_NODES: usize = 120;

/// Default page title for the exported visualization
pub const DEFAULT_TITLE: &str = "Provider Network - Shared Patient Revenue Analysis";

/// Configuration for building and displaying the provider network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// How revenue from a common patient is attributed to a provider pair
    pub aggregation_rule: AggregationRule,
    /// Minimum number of shared patients for an edge to exist
    pub min_shared_patients: usize,
    /// Number of highest-degree providers kept for display
    pub max_display_nodes: usize,
    /// Force-directed layout parameters
    pub layout: LayoutConfig,
    /// Title of the exported page
    pub title: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            aggregation_rule: AggregationRule::default(),
            min_shared_patients: 1,
            max_display_nodes: DEFAULT_MAX_DISPLAY_NODES,
            layout: LayoutConfig::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl NetworkConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing the configuration
    #[must_use]
    pub fn builder() -> NetworkConfigBuilder {
        NetworkConfigBuilder::new()
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "reading network configuration")?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if self.max_display_nodes == 0 {
            return Err(NetworkError::config("max_display_nodes must be at least 1"));
        }
        self.layout.validate()
    }

    /// Minimum shared patients, never below one
    #[must_use]
    pub fn effective_min_shared_patients(&self) -> usize {
        self.min_shared_patients.max(1)
    }
}

impl fmt::Display for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network Configuration:")?;
        writeln!(f, "  Aggregation Rule: {}", self.aggregation_rule)?;
        writeln!(f, "  Min Shared Patients: {}", self.min_shared_patients)?;
        writeln!(f, "  Max Display Nodes: {}", self.max_display_nodes)?;
        writeln!(f, "  Layout Iterations: {}", self.layout.iterations)?;
        writeln!(f, "  Layout Seed: {}", self.layout.seed)?;
        Ok(())
    }
}

/// Builder for constructing a network configuration
#[derive(Debug, Clone, Default)]
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    #[must_use]
    pub fn from_config(config: NetworkConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn aggregation_rule(mut self, rule: AggregationRule) -> Self {
        self.config.aggregation_rule = rule;
        self
    }

    #[must_use]
    pub const fn min_shared_patients(mut self, min: usize) -> Self {
        self.config.min_shared_patients = min;
        self
    }

    #[must_use]
    pub const fn max_display_nodes(mut self, max: usize) -> Self {
        self.config.max_display_nodes = max;
        self
    }

    #[must_use]
    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    /// Set the layout seed without replacing the rest of the layout config
    #[must_use]
    pub const fn layout_seed(mut self, seed: u64) -> Self {
        self.config.layout.seed = seed;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<NetworkConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
