//! Claim model
//!
//! A claim is the atomic fact every aggregate in the network derives from:
//! one provider billing one patient for an allowed amount.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::models::provider::{PatientId, ProviderId};

/// A single healthcare claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim identifier
    pub claim_id: String,
    /// Servicing provider
    #[serde(rename = "servicing_provider_npi_number")]
    pub provider_id: ProviderId,
    /// Patient alias
    #[serde(rename = "person_alias")]
    pub patient_id: PatientId,
    /// Allowed amount in dollars
    pub allowed_amount: f64,
    /// Taxonomy classification of the service
    #[serde(rename = "taxonomy_classification")]
    pub taxonomy: Option<String>,
    /// Date of service
    pub service_date: Option<NaiveDate>,
}

impl Claim {
    /// Create a claim without taxonomy or service date
    #[must_use]
    pub fn new(
        claim_id: impl Into<String>,
        provider_id: impl Into<ProviderId>,
        patient_id: impl Into<PatientId>,
        allowed_amount: f64,
    ) -> Self {
        Self {
            claim_id: claim_id.into(),
            provider_id: provider_id.into(),
            patient_id: patient_id.into(),
            allowed_amount,
            taxonomy: None,
            service_date: None,
        }
    }

    /// Attach a taxonomy classification
    #[must_use]
    pub fn with_taxonomy(mut self, taxonomy: impl Into<String>) -> Self {
        self.taxonomy = Some(taxonomy.into());
        self
    }

    /// Attach a service date
    #[must_use]
    pub const fn with_service_date(mut self, date: NaiveDate) -> Self {
        self.service_date = Some(date);
        self
    }
}

/// Raw claim row as it appears in a CSV file, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimRecord {
    #[serde(default)]
    pub claim_id: Option<String>,
    #[serde(default, rename = "servicing_provider_npi_number")]
    pub provider_id: Option<String>,
    #[serde(default, rename = "person_alias")]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub allowed_amount: Option<f64>,
    #[serde(default, rename = "taxonomy_classification")]
    pub taxonomy: Option<String>,
    #[serde(default)]
    pub service_date: Option<NaiveDate>,
}

impl ClaimRecord {
    /// Validate the raw row and turn it into a [`Claim`]
    ///
    /// `line` is only used to name claims that carry no identifier.
    pub fn into_claim(self, line: u64) -> Result<Claim> {
        let provider_id = non_blank(self.provider_id)
            .ok_or_else(|| NetworkError::InvalidInput("missing provider NPI".to_string()))?;
        let patient_id = non_blank(self.patient_id)
            .ok_or_else(|| NetworkError::InvalidInput("missing patient alias".to_string()))?;
        let allowed_amount = self
            .allowed_amount
            .ok_or_else(|| NetworkError::InvalidInput("missing allowed amount".to_string()))?;

        if !allowed_amount.is_finite() || allowed_amount < 0.0 {
            return Err(NetworkError::InvalidInput(format!(
                "allowed amount {allowed_amount} is not a non-negative number"
            )));
        }

        Ok(Claim {
            claim_id: non_blank(self.claim_id).unwrap_or_else(|| format!("row-{line}")),
            provider_id: ProviderId::new(provider_id),
            patient_id: PatientId::new(patient_id),
            allowed_amount,
            taxonomy: non_blank(self.taxonomy),
            service_date: self.service_date,
        })
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
