//! Provider and patient identifiers, roster and per-provider profile

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::models::claim::non_blank;

/// Organization names carrying this value were redacted upstream
const MASKED: &str = "MASKED";

/// Specialty used when neither claims nor roster name one
pub const UNKNOWN_SPECIALTY: &str = "Unknown";

/// Synthetic National Provider Identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProviderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Synthetic patient alias
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatientId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PatientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One row of the provider roster, using NPPES column names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(rename = "NPI")]
    pub npi: String,
    #[serde(default, rename = "Provider Organization Name (Legal Business Name)")]
    pub organization_name: Option<String>,
    #[serde(default, rename = "Provider Name Prefix Text")]
    pub name_prefix: Option<String>,
    #[serde(default, rename = "Provider First Name")]
    pub first_name: Option<String>,
    #[serde(default, rename = "Provider Middle Name")]
    pub middle_name: Option<String>,
    #[serde(default, rename = "Provider Last Name (Legal Name)")]
    pub last_name: Option<String>,
    #[serde(default, rename = "Provider Name Suffix Text")]
    pub name_suffix: Option<String>,
    #[serde(default, rename = "Provider Credential Text")]
    pub credential: Option<String>,
    #[serde(default, rename = "Healthcare Provider Taxonomy")]
    pub taxonomy: Option<String>,
}

impl RosterEntry {
    /// Resolve the display name for this roster entry
    ///
    /// Organization names win unless masked; otherwise the individual name
    /// parts are joined in prefix, first, middle, last, suffix, credential
    /// order. Entries with no usable name get `Provider <npi>`.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(org) = non_blank(self.organization_name.clone())
            && org != MASKED
        {
            return org;
        }

        let parts: Vec<String> = [
            &self.name_prefix,
            &self.first_name,
            &self.middle_name,
            &self.last_name,
            &self.name_suffix,
            &self.credential,
        ]
        .into_iter()
        .filter_map(|part| non_blank(part.clone()))
        .collect();

        if parts.is_empty() {
            fallback_name(self.npi.trim())
        } else {
            parts.join(" ")
        }
    }
}

fn fallback_name(npi: &str) -> String {
    format!("Provider {npi}")
}

#[derive(Debug, Clone)]
struct RosterListing {
    name: String,
    taxonomy: Option<String>,
}

/// Lookup from provider NPI to display name and roster taxonomy
#[derive(Debug, Clone, Default)]
pub struct ProviderRoster {
    listings: FxHashMap<ProviderId, RosterListing>,
}

impl ProviderRoster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from parsed entries; later duplicates replace earlier ones
    #[must_use]
    pub fn from_entries(entries: &[RosterEntry]) -> Self {
        let mut roster = Self::new();
        for entry in entries {
            roster.insert(entry);
        }
        roster
    }

    pub fn insert(&mut self, entry: &RosterEntry) {
        let npi = entry.npi.trim();
        if npi.is_empty() {
            return;
        }
        self.listings.insert(
            ProviderId::new(npi),
            RosterListing {
                name: entry.display_name(),
                taxonomy: non_blank(entry.taxonomy.clone()),
            },
        );
    }

    /// Display name for a provider, falling back to `Provider <npi>`
    #[must_use]
    pub fn display_name(&self, id: &ProviderId) -> String {
        self.listings
            .get(id)
            .map_or_else(|| fallback_name(id.as_str()), |l| l.name.clone())
    }

    #[must_use]
    pub fn taxonomy(&self, id: &ProviderId) -> Option<&str> {
        self.listings.get(id).and_then(|l| l.taxonomy.as_deref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// Claim-derived statistics for one provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderProfile {
    pub id: ProviderId,
    pub name: String,
    pub specialty: String,
    pub total_claims: usize,
    pub total_revenue: f64,
    pub unique_patients: usize,
    pub avg_claim_amount: f64,
}
