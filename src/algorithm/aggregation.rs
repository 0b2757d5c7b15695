//! Shared-revenue aggregation
//!
//! Groups claims by patient, then by provider, and accumulates a shared
//! patient count and shared revenue for every unordered pair of distinct
//! providers that billed the same patient.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{NetworkError, Result};
use crate::models::{Claim, PatientId, ProviderId};

/// How revenue from one common patient is attributed to a provider pair
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationRule {
    /// The smaller of the two providers' billings for the patient
    #[default]
    MinMatched,
    /// Both providers' billings for the patient added together
    PairTotal,
    /// Everything billed for the patient, by any provider
    PatientTotal,
}

impl AggregationRule {
    /// Revenue contributed by one common patient
    ///
    /// `first` and `second` are what each provider billed the patient,
    /// `patient_total` is what every provider billed them.
    #[must_use]
    pub fn contribution(self, first: f64, second: f64, patient_total: f64) -> f64 {
        match self {
            Self::MinMatched => first.min(second),
            Self::PairTotal => first + second,
            Self::PatientTotal => patient_total,
        }
    }
}

impl fmt::Display for AggregationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MinMatched => "min-matched",
            Self::PairTotal => "pair-total",
            Self::PatientTotal => "patient-total",
        };
        f.write_str(label)
    }
}

/// Unordered pair of distinct providers, stored as `low < high`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProviderPair {
    low: ProviderId,
    high: ProviderId,
}

impl ProviderPair {
    /// Normalize two providers into a pair; a provider cannot pair with itself
    pub fn new(a: ProviderId, b: ProviderId) -> Result<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Ok(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => Err(NetworkError::InvalidInput(format!(
                "provider {a} cannot share patients with itself"
            ))),
        }
    }

    #[must_use]
    pub const fn low(&self) -> &ProviderId {
        &self.low
    }

    #[must_use]
    pub const fn high(&self) -> &ProviderId {
        &self.high
    }

    #[must_use]
    pub fn contains(&self, id: &ProviderId) -> bool {
        &self.low == id || &self.high == id
    }

    /// The endpoint that is not `id`, if `id` is an endpoint
    #[must_use]
    pub fn other(&self, id: &ProviderId) -> Option<&ProviderId> {
        if &self.low == id {
            Some(&self.high)
        } else if &self.high == id {
            Some(&self.low)
        } else {
            None
        }
    }
}

/// Accumulated overlap between two providers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairMetrics {
    pub shared_patients: usize,
    pub shared_revenue: f64,
}

impl PairMetrics {
    #[must_use]
    pub fn avg_revenue_per_shared_patient(&self) -> f64 {
        if self.shared_patients == 0 {
            0.0
        } else {
            self.shared_revenue / self.shared_patients as f64
        }
    }
}

/// Pairwise overlap for a claims table, ordered by pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedRevenueTable {
    pub rule: AggregationRule,
    pub pairs: BTreeMap<ProviderPair, PairMetrics>,
    /// Patients billed by more than one provider
    pub multi_provider_patients: usize,
}

impl SharedRevenueTable {
    #[must_use]
    pub fn get(&self, a: &ProviderId, b: &ProviderId) -> Option<&PairMetrics> {
        let pair = ProviderPair::new(a.clone(), b.clone()).ok()?;
        self.pairs.get(&pair)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Revenue billed to one patient, split by provider
type PatientBillings<'a> = SmallVec<[(&'a ProviderId, f64); 8]>;

/// Build the shared-revenue table for a set of claims
#[must_use]
pub fn aggregate_shared_revenue(claims: &[Claim], rule: AggregationRule) -> SharedRevenueTable {
    info!(
        "Aggregating shared revenue over {} claims ({rule})",
        claims.len()
    );

    let mut by_patient: FxHashMap<&PatientId, PatientBillings<'_>> = FxHashMap::default();
    for claim in claims {
        let billings = by_patient.entry(&claim.patient_id).or_default();
        match billings.iter_mut().find(|(p, _)| *p == &claim.provider_id) {
            Some((_, amount)) => *amount += claim.allowed_amount,
            None => billings.push((&claim.provider_id, claim.allowed_amount)),
        }
    }

    // Visit patients in id order so per-pair sums accumulate in a stable order
    let mut patients: Vec<_> = by_patient
        .into_iter()
        .filter(|(_, billings)| billings.len() > 1)
        .collect();
    patients.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut pairs: BTreeMap<ProviderPair, PairMetrics> = BTreeMap::new();
    let multi_provider_patients = patients.len();
    for (_, mut billings) in patients {
        billings.sort_unstable_by(|a, b| a.0.cmp(b.0));
        let patient_total: f64 = billings.iter().map(|(_, amount)| amount).sum();

        for ((p1, r1), (p2, r2)) in billings.iter().tuple_combinations() {
            // Billings are sorted and deduplicated, so p1 < p2
            let pair = ProviderPair {
                low: (*p1).clone(),
                high: (*p2).clone(),
            };
            let contribution = rule.contribution(*r1, *r2, patient_total);
            let metrics = pairs.entry(pair).or_default();
            metrics.shared_patients += 1;
            metrics.shared_revenue += contribution;
        }
    }

    debug!(
        "{} patients with multiple providers produced {} provider pairs",
        multi_provider_patients,
        pairs.len()
    );

    SharedRevenueTable {
        rule,
        pairs,
        multi_provider_patients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> Vec<Claim> {
        vec![
            Claim::new("1", "A", "P1", 100.0),
            Claim::new("2", "B", "P1", 40.0),
            Claim::new("3", "B", "P1", 20.0),
            Claim::new("4", "C", "P1", 10.0),
            Claim::new("5", "A", "P2", 30.0),
            Claim::new("6", "B", "P2", 50.0),
            Claim::new("7", "D", "P3", 500.0),
        ]
    }

    fn id(s: &str) -> ProviderId {
        ProviderId::new(s)
    }

    #[test]
    fn test_pair_normalization() {
        let pair = ProviderPair::new(id("B"), id("A")).unwrap();
        assert_eq!(pair.low(), &id("A"));
        assert_eq!(pair.high(), &id("B"));
        assert_eq!(pair.other(&id("A")), Some(&id("B")));
        assert_eq!(pair.other(&id("Z")), None);
        assert!(ProviderPair::new(id("A"), id("A")).is_err());
    }

    #[test]
    fn test_min_matched_rule() {
        let table = aggregate_shared_revenue(&claims(), AggregationRule::MinMatched);

        assert_eq!(table.multi_provider_patients, 2);
        assert_eq!(table.len(), 3);

        let ab = table.get(&id("A"), &id("B")).unwrap();
        assert_eq!(ab.shared_patients, 2);
        // P1: min(100, 60) + P2: min(30, 50)
        assert_eq!(ab.shared_revenue, 90.0);
        assert_eq!(ab.avg_revenue_per_shared_patient(), 45.0);

        let bc = table.get(&id("C"), &id("B")).unwrap();
        assert_eq!(bc.shared_patients, 1);
        assert_eq!(bc.shared_revenue, 10.0);

        assert!(table.get(&id("A"), &id("D")).is_none());
    }

    #[test]
    fn test_pair_total_and_patient_total_rules() {
        let pair_total = aggregate_shared_revenue(&claims(), AggregationRule::PairTotal);
        assert_eq!(pair_total.get(&id("A"), &id("B")).unwrap().shared_revenue, 240.0);

        let totals = aggregate_shared_revenue(&claims(), AggregationRule::PatientTotal);
        // P1 total 170 + P2 total 80
        assert_eq!(totals.get(&id("A"), &id("B")).unwrap().shared_revenue, 250.0);
        assert_eq!(totals.get(&id("A"), &id("C")).unwrap().shared_revenue, 170.0);
    }

    #[test]
    fn test_repeat_claims_do_not_create_self_pairs() {
        let claims = vec![
            Claim::new("1", "A", "P1", 10.0),
            Claim::new("2", "A", "P1", 15.0),
        ];
        let table = aggregate_shared_revenue(&claims, AggregationRule::MinMatched);
        assert!(table.is_empty());
        assert_eq!(table.multi_provider_patients, 0);
    }

    #[test]
    fn test_claim_order_does_not_change_table() {
        let mut reversed = claims();
        reversed.reverse();

        let forward = aggregate_shared_revenue(&claims(), AggregationRule::MinMatched);
        let backward = aggregate_shared_revenue(&reversed, AggregationRule::MinMatched);
        assert_eq!(forward, backward);
        assert_eq!(
            forward.get(&id("A"), &id("B")),
            Some(&PairMetrics {
                shared_patients: 2,
                shared_revenue: 90.0,
            })
        );
    }

    #[test]
    fn test_empty_claims() {
        let table = aggregate_shared_revenue(&[], AggregationRule::default());
        assert!(table.is_empty());
    }
}
