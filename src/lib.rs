//! A Rust library for synthesizing healthcare claims, deriving the
//! shared-patient revenue network between providers, and exporting it as an
//! interactive visualization.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::NetworkConfig;
pub use error::{NetworkError, Result};
pub use models::{Claim, PatientId, ProviderId, ProviderRoster, RosterEntry};
pub use pipeline::{Pipeline, PipelineOutput};

// Pipeline stages
pub use algorithm::aggregation::{AggregationRule, SharedRevenueTable, aggregate_shared_revenue};
pub use algorithm::layout::{ForceDirectedLayout, Layout, LayoutConfig, Position};
pub use algorithm::network::{NetworkBuilder, ProviderNetwork, ProviderNode, SharedRevenueEdge};
pub use algorithm::statistics::NetworkStatistics;
pub use algorithm::synthesis::{ClaimsSynthesizer, SynthesizerConfig, SyntheticDataset};

// Export
pub use export::{VisualizationPayload, render_html, write_html, write_json};
