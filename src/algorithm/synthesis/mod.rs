//! Synthetic claims generation
//!
//! Produces a provider roster and a claims table with no real identifiers.
//! NPIs are 10 digits starting with `9`, a range real NPIs do not use.
//! Patients visit a handful of providers drawn by a lognormal popularity
//! weight, so a few providers become hubs that share many patients.

pub mod config;
pub mod names;

pub use config::{SynthesizerConfig, SynthesizerConfigBuilder};

use chrono::{Days, NaiveDate};
use log::{info, warn};
use rand::prelude::*;
use rand_distr::{Distribution, LogNormal};

use crate::error::{NetworkError, Result};
use crate::models::{Claim, PatientId, ProviderId, RosterEntry};
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};
use names::{SPECIALTIES, Specialty};

/// Probability that a patient who has seen `k` providers sees one more
const ADDITIONAL_PROVIDER_PROBABILITY: f64 = 0.55;

/// A generated roster and the claims billed by it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntheticDataset {
    pub roster: Vec<RosterEntry>,
    pub claims: Vec<Claim>,
}

#[derive(Debug, Clone)]
struct SyntheticProvider {
    id: ProviderId,
    specialty: &'static Specialty,
    popularity: f64,
}

/// Seeded generator of synthetic claims
#[derive(Debug, Clone, Default)]
pub struct ClaimsSynthesizer {
    config: SynthesizerConfig,
}

impl ClaimsSynthesizer {
    #[must_use]
    pub const fn new(config: SynthesizerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &SynthesizerConfig {
        &self.config
    }

    /// Generate a roster and claims table
    pub fn generate(&self) -> Result<SyntheticDataset> {
        let config = &self.config;
        config.validate()?;
        info!(
            "Synthesizing claims for {} providers and {} patients (seed {})",
            config.provider_count, config.patient_count, config.seed
        );

        let mut rng = StdRng::seed_from_u64(config.seed);
        let amounts = LogNormal::new(config.amount_log_mean, config.amount_log_std_dev)
            .map_err(|e| NetworkError::config(format!("invalid amount distribution: {e}")))?;
        let popularity = LogNormal::new(0.0, 1.0)
            .map_err(|e| NetworkError::config(format!("invalid popularity distribution: {e}")))?;

        let mut providers = Vec::with_capacity(config.provider_count);
        let mut roster = Vec::with_capacity(config.provider_count);
        let npi_base: u64 = rng.random_range(100_000_000..500_000_000);

        for i in 0..config.provider_count {
            let specialty = SPECIALTIES
                .choose_weighted(&mut rng, |s| s.weight)
                .map_err(|e| NetworkError::config(format!("invalid specialty weights: {e}")))?;
            let id = ProviderId::new(format!("9{:09}", npi_base + i as u64 * 7));
            let is_organization = rng.random_bool(config.organization_ratio);

            roster.push(roster_entry(&mut rng, &id, specialty, is_organization));
            providers.push(SyntheticProvider {
                id,
                specialty,
                popularity: popularity.sample(&mut rng),
            });
        }

        if providers.is_empty() {
            warn!("No providers to bill claims; the claims table will be empty");
            return Ok(SyntheticDataset {
                roster,
                claims: Vec::new(),
            });
        }

        let date_span = (config.end_date - config.start_date).num_days().max(0) as u64;
        let pb = create_main_progress_bar(config.patient_count as u64, Some("Synthesizing claims"));
        let mut claims = Vec::new();

        for p in 0..config.patient_count {
            let patient = PatientId::new(format!("PA{:07}", p + 1));
            let visit_count = self.visit_count(&mut rng, providers.len());

            for idx in sample_by_popularity(&mut rng, &providers, visit_count) {
                let provider = &providers[idx];
                let claim_count = rng.random_range(1..=config.max_claims_per_visit);
                for _ in 0..claim_count {
                    let raw = amounts.sample(&mut rng) * provider.specialty.amount_multiplier;
                    let amount = ((raw * 100.0).round() / 100.0).max(0.01);
                    let service_date =
                        service_date(config.start_date, rng.random_range(0..=date_span));

                    claims.push(
                        Claim::new(
                            format!("CLM{:08}", claims.len() + 1),
                            provider.id.clone(),
                            patient.clone(),
                            amount,
                        )
                        .with_taxonomy(provider.specialty.name)
                        .with_service_date(service_date),
                    );
                }
            }
            pb.inc(1);
        }
        finish_progress_bar(&pb, Some("Synthesis complete"));

        info!(
            "Synthesized {} claims across {} providers",
            claims.len(),
            providers.len()
        );
        Ok(SyntheticDataset { roster, claims })
    }

    fn visit_count(&self, rng: &mut StdRng, provider_count: usize) -> usize {
        let max = self.config.max_providers_per_patient.min(provider_count);
        let mut count = 1;
        while count < max && rng.random_bool(ADDITIONAL_PROVIDER_PROBABILITY) {
            count += 1;
        }
        count
    }
}

fn service_date(start: NaiveDate, offset: u64) -> NaiveDate {
    start.checked_add_days(Days::new(offset)).unwrap_or(start)
}

/// Draw `count` distinct provider indices, weighted by popularity
fn sample_by_popularity(
    rng: &mut StdRng,
    providers: &[SyntheticProvider],
    count: usize,
) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..providers.len()).collect();
    let mut chosen = Vec::with_capacity(count);

    while chosen.len() < count && !remaining.is_empty() {
        let total: f64 = remaining.iter().map(|&i| providers[i].popularity).sum();
        let mut target = rng.random::<f64>() * total;
        let mut pick = remaining.len() - 1;
        for (slot, &i) in remaining.iter().enumerate() {
            target -= providers[i].popularity;
            if target <= 0.0 {
                pick = slot;
                break;
            }
        }
        chosen.push(remaining.swap_remove(pick));
    }

    chosen
}

fn roster_entry(
    rng: &mut StdRng,
    id: &ProviderId,
    specialty: &Specialty,
    is_organization: bool,
) -> RosterEntry {
    let mut entry = RosterEntry {
        npi: id.to_string(),
        taxonomy: Some(specialty.name.to_string()),
        ..Default::default()
    };

    if is_organization {
        entry.organization_name = Some(format!(
            "{} {} {}",
            pick(rng, names::PLACES),
            specialty.practice,
            pick(rng, names::ORGANIZATION_SUFFIXES)
        ));
        return entry;
    }

    let credentials = if specialty.name == "Physical Therapist" {
        names::PHYSICAL_THERAPY_CREDENTIALS
    } else {
        names::CREDENTIALS
    };
    let credential = pick(rng, credentials);

    if matches!(credential, "MD" | "DO") && rng.random_bool(0.5) {
        entry.name_prefix = Some("Dr.".to_string());
    }
    entry.first_name = Some(pick(rng, names::FIRST_NAMES).to_string());
    if rng.random_bool(0.4) {
        entry.middle_name = Some(pick(rng, names::MIDDLE_INITIALS).to_string());
    }
    entry.last_name = Some(pick(rng, names::LAST_NAMES).to_string());
    entry.credential = Some(credential.to_string());
    entry
}

fn pick(rng: &mut StdRng, options: &'static [&'static str]) -> &'static str {
    options.choose(rng).copied().unwrap_or_default()
}
