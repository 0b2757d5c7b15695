//! Configuration for the claims synthesizer

use chrono::NaiveDate;
use std::fmt;

use crate::error::{NetworkError, Result};

/// Configuration for synthetic claims generation
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizerConfig {
    /// Number of providers in the roster
    pub provider_count: usize,
    /// Number of distinct patients
    pub patient_count: usize,
    /// Upper bound on distinct providers a patient visits
    pub max_providers_per_patient: usize,
    /// Upper bound on claims per provider visit
    pub max_claims_per_visit: usize,
    /// Share of providers that are organizations rather than individuals
    pub organization_ratio: f64,
    /// Mean of the log of claim amounts
    pub amount_log_mean: f64,
    /// Standard deviation of the log of claim amounts
    pub amount_log_std_dev: f64,
    /// First possible service date
    pub start_date: NaiveDate,
    /// Last possible service date
    pub end_date: NaiveDate,
    /// Random seed; identical seeds give identical datasets
    pub seed: u64,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            provider_count: 150,
            patient_count: 2000,
            max_providers_per_patient: 5,
            max_claims_per_visit: 3,
            organization_ratio: 0.2,
            amount_log_mean: 5.0,
            amount_log_std_dev: 0.8,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default(),
            seed: 42,
        }
    }
}

impl SynthesizerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> SynthesizerConfigBuilder {
        SynthesizerConfigBuilder::new()
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if self.max_providers_per_patient == 0 {
            return Err(NetworkError::config(
                "max_providers_per_patient must be at least 1",
            ));
        }
        if self.max_claims_per_visit == 0 {
            return Err(NetworkError::config("max_claims_per_visit must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.organization_ratio) {
            return Err(NetworkError::config(format!(
                "organization_ratio must be within [0, 1], got {}",
                self.organization_ratio
            )));
        }
        let distribution_ok = self.amount_log_mean.is_finite()
            && self.amount_log_std_dev.is_finite()
            && self.amount_log_std_dev >= 0.0;
        if !distribution_ok {
            return Err(NetworkError::config("amount distribution parameters must be finite"));
        }
        if self.end_date < self.start_date {
            return Err(NetworkError::config(format!(
                "end_date {} precedes start_date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }
}

impl fmt::Display for SynthesizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Synthesizer Configuration:")?;
        writeln!(f, "  Providers: {}", self.provider_count)?;
        writeln!(f, "  Patients: {}", self.patient_count)?;
        writeln!(f, "  Max Providers per Patient: {}", self.max_providers_per_patient)?;
        writeln!(f, "  Service Dates: {} to {}", self.start_date, self.end_date)?;
        writeln!(f, "  Seed: {}", self.seed)?;
        Ok(())
    }
}

/// Builder for constructing synthesizer configuration
#[derive(Debug, Clone, Default)]
pub struct SynthesizerConfigBuilder {
    config: SynthesizerConfig,
}

impl SynthesizerConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn provider_count(mut self, count: usize) -> Self {
        self.config.provider_count = count;
        self
    }

    #[must_use]
    pub const fn patient_count(mut self, count: usize) -> Self {
        self.config.patient_count = count;
        self
    }

    #[must_use]
    pub const fn max_providers_per_patient(mut self, max: usize) -> Self {
        self.config.max_providers_per_patient = max;
        self
    }

    #[must_use]
    pub const fn max_claims_per_visit(mut self, max: usize) -> Self {
        self.config.max_claims_per_visit = max;
        self
    }

    #[must_use]
    pub const fn organization_ratio(mut self, ratio: f64) -> Self {
        self.config.organization_ratio = ratio;
        self
    }

    #[must_use]
    pub const fn amount_distribution(mut self, log_mean: f64, log_std_dev: f64) -> Self {
        self.config.amount_log_mean = log_mean;
        self.config.amount_log_std_dev = log_std_dev;
        self
    }

    #[must_use]
    pub const fn service_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.config.start_date = start;
        self.config.end_date = end;
        self
    }

    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SynthesizerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
