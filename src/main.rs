use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use provider_network::utils::io::{write_claims, write_roster};
use provider_network::{
    AggregationRule, ClaimsSynthesizer, NetworkConfig, Pipeline, PipelineOutput, SynthesizerConfig,
};

#[derive(Parser)]
#[command(name = "provider-network")]
#[command(about = "Synthetic provider shared-revenue network builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a synthetic claims table and provider roster as CSV
    Synthesize {
        #[command(flatten)]
        synth: SynthArgs,

        /// Directory the CSV files are written to
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,
    },

    /// Build the network from CSV files and export the visualization
    Build {
        /// Claims CSV file
        #[arg(long, default_value = "data/synthetic_claims.csv")]
        claims: PathBuf,

        /// Provider roster CSV file
        #[arg(long, default_value = "data/synthetic_providers.csv")]
        roster: PathBuf,

        #[command(flatten)]
        network: NetworkArgs,
    },

    /// Synthesize claims in memory and export the visualization
    Run {
        #[command(flatten)]
        synth: SynthArgs,

        #[command(flatten)]
        network: NetworkArgs,
    },
}

#[derive(Args)]
struct SynthArgs {
    /// Number of providers
    #[arg(long, default_value_t = 150)]
    providers: usize,

    /// Number of patients
    #[arg(long, default_value_t = 2000)]
    patients: usize,

    /// Random seed for the synthesizer
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

impl SynthArgs {
    fn to_config(&self) -> Result<SynthesizerConfig> {
        SynthesizerConfig::builder()
            .provider_count(self.providers)
            .patient_count(self.patients)
            .seed(self.seed)
            .build()
            .context("Invalid synthesizer settings")
    }
}

#[derive(Args)]
struct NetworkArgs {
    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule for attributing a common patient's revenue to a provider pair
    #[arg(long, value_enum)]
    rule: Option<AggregationRule>,

    /// Minimum shared patients for a connection
    #[arg(long)]
    min_shared_patients: Option<usize>,

    /// Number of highest-degree providers to render
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Seed for the layout
    #[arg(long)]
    layout_seed: Option<u64>,

    /// HTML output file
    #[arg(long, default_value = "output/shared_revenue_network.html")]
    output: PathBuf,

    /// Optional JSON payload output file
    #[arg(long)]
    json: Option<PathBuf>,
}

impl NetworkArgs {
    fn to_config(&self) -> Result<NetworkConfig> {
        let mut config = match &self.config {
            Some(path) => NetworkConfig::from_json_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => NetworkConfig::default(),
        };

        if let Some(rule) = self.rule {
            config.aggregation_rule = rule;
        }
        if let Some(min) = self.min_shared_patients {
            config.min_shared_patients = min;
        }
        if let Some(max) = self.max_nodes {
            config.max_display_nodes = max;
        }
        if let Some(seed) = self.layout_seed {
            config.layout.seed = seed;
        }
        config.validate().context("Invalid network settings")?;
        Ok(config)
    }

    fn export(&self, output: &PipelineOutput) -> Result<()> {
        output
            .write(&self.output, self.json.as_deref())
            .with_context(|| format!("Failed to export {}", self.output.display()))?;
        info!("Shared revenue network saved: {}", self.output.display());
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Synthesize { synth, out_dir } => synthesize(&synth, &out_dir)?,
        Commands::Build {
            claims,
            roster,
            network,
        } => {
            let config = network.to_config()?;
            info!("{config}");
            let output = Pipeline::new(config)
                .run_files(&claims, Some(&roster))
                .with_context(|| format!("Failed to build network from {}", claims.display()))?;
            report(&output);
            network.export(&output)?;
        }
        Commands::Run { synth, network } => {
            let dataset = ClaimsSynthesizer::new(synth.to_config()?).generate()?;
            let config = network.to_config()?;
            info!("{config}");
            let output = Pipeline::new(config).run_synthetic(&dataset)?;
            report(&output);
            network.export(&output)?;
        }
    }

    info!("Completed in {:?}", start.elapsed());
    Ok(())
}

fn synthesize(args: &SynthArgs, out_dir: &Path) -> Result<()> {
    let config = args.to_config()?;
    info!("{config}");
    let dataset = ClaimsSynthesizer::new(config).generate()?;

    let claims_path = out_dir.join("synthetic_claims.csv");
    let roster_path = out_dir.join("synthetic_providers.csv");
    write_claims(&claims_path, &dataset.claims)
        .with_context(|| format!("Failed to write {}", claims_path.display()))?;
    write_roster(&roster_path, &dataset.roster)
        .with_context(|| format!("Failed to write {}", roster_path.display()))?;
    Ok(())
}

fn report(output: &PipelineOutput) {
    for line in output.statistics.generate_summary().lines() {
        info!("{line}");
    }
}
