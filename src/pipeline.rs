//! End-to-end pipeline: claims to laid-out, exportable network

use std::path::Path;
use std::time::Instant;

use log::info;

use crate::algorithm::layout::{ForceDirectedLayout, Layout};
use crate::algorithm::network::{NetworkBuilder, ProviderNetwork};
use crate::algorithm::statistics::NetworkStatistics;
use crate::algorithm::synthesis::SyntheticDataset;
use crate::config::NetworkConfig;
use crate::error::Result;
use crate::export::{self, VisualizationPayload};
use crate::models::{Claim, ProviderRoster, RosterEntry};
use crate::utils::io::{read_claims, read_roster};
use crate::utils::logging::log_warning;

/// Everything a pipeline run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The full network over every provider in the claims
    pub network: ProviderNetwork,
    /// The highest-degree subgraph that is laid out and rendered
    pub display_network: ProviderNetwork,
    pub layout: Layout,
    /// Statistics for the full network
    pub statistics: NetworkStatistics,
    /// Renderable view of the display network
    pub payload: VisualizationPayload,
}

/// Runs the build, layout and statistics stages
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: NetworkConfig,
}

impl Pipeline {
    #[must_use]
    pub const fn new(config: NetworkConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Run every stage over in-memory claims and roster entries
    pub fn run(&self, claims: &[Claim], roster: &[RosterEntry]) -> Result<PipelineOutput> {
        self.config.validate()?;
        let start = Instant::now();

        let network = NetworkBuilder::new(&self.config)
            .with_roster(ProviderRoster::from_entries(roster))
            .build(claims);
        if network.edge_count() == 0 {
            log_warning("No shared-patient connections found; exporting an empty graph", None);
        }

        let display_network = network.top_by_degree(self.config.max_display_nodes);
        info!(
            "Working with subset: {} providers, {} connections",
            display_network.node_count(),
            display_network.edge_count()
        );

        let layout = ForceDirectedLayout::new(self.config.layout.clone())
            .compute(&display_network);
        let statistics = NetworkStatistics::calculate(&network);
        let display_statistics = NetworkStatistics::calculate(&display_network);
        let payload = VisualizationPayload::assemble(
            &display_network,
            &layout,
            display_statistics,
            self.config.title.clone(),
        );

        info!("Pipeline finished in {:?}", start.elapsed());
        Ok(PipelineOutput {
            network,
            display_network,
            layout,
            statistics,
            payload,
        })
    }

    /// Run over a synthesized dataset
    pub fn run_synthetic(&self, dataset: &SyntheticDataset) -> Result<PipelineOutput> {
        self.run(&dataset.claims, &dataset.roster)
    }

    /// Read claims and an optional roster from CSV files, then run
    ///
    /// A roster path that does not exist only costs display names.
    pub fn run_files(
        &self,
        claims_path: &Path,
        roster_path: Option<&Path>,
    ) -> Result<PipelineOutput> {
        let claims = read_claims(claims_path)?.into_records();
        let roster = match roster_path {
            Some(path) if path.exists() => read_roster(path)?.into_records(),
            Some(path) => {
                log_warning("Provider roster not found, using NPI-based names", Some(path));
                Vec::new()
            }
            None => Vec::new(),
        };
        self.run(&claims, &roster)
    }
}

impl PipelineOutput {
    /// Write the HTML page and, when asked, the JSON payload
    pub fn write(&self, html_path: &Path, json_path: Option<&Path>) -> Result<()> {
        export::write_html(&self.payload, html_path)?;
        if let Some(path) = json_path {
            export::write_json(&self.payload, path)?;
        }
        Ok(())
    }
}
