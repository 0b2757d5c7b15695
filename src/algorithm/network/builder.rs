//! Network construction from claims

use std::collections::BTreeMap;
use std::time::Instant;

use log::info;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{ProviderNetwork, SharedRevenueEdge, shared_percentage};
use crate::algorithm::aggregation::{AggregationRule, aggregate_shared_revenue};
use crate::config::NetworkConfig;
use crate::models::{
    Claim, PatientId, ProviderId, ProviderProfile, ProviderRoster, UNKNOWN_SPECIALTY,
};

/// Builds a [`ProviderNetwork`] from a claims table
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    rule: AggregationRule,
    min_shared_patients: usize,
    roster: ProviderRoster,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new(&NetworkConfig::default())
    }
}

impl NetworkBuilder {
    #[must_use]
    pub fn new(config: &NetworkConfig) -> Self {
        Self {
            rule: config.aggregation_rule,
            min_shared_patients: config.effective_min_shared_patients(),
            roster: ProviderRoster::new(),
        }
    }

    /// Use a roster for display names and fallback specialties
    #[must_use]
    pub fn with_roster(mut self, roster: ProviderRoster) -> Self {
        self.roster = roster;
        self
    }

    #[must_use]
    pub const fn with_rule(mut self, rule: AggregationRule) -> Self {
        self.rule = rule;
        self
    }

    /// Edges need at least this many shared patients; values below one act as one
    #[must_use]
    pub fn with_min_shared_patients(mut self, min: usize) -> Self {
        self.min_shared_patients = min.max(1);
        self
    }

    /// Build the network
    ///
    /// Every distinct provider in `claims` becomes a node, whether or not it
    /// shares patients with anyone.
    #[must_use]
    pub fn build(&self, claims: &[Claim]) -> ProviderNetwork {
        let start = Instant::now();
        info!(
            "Creating shared revenue network (min {} shared patients)",
            self.min_shared_patients
        );

        let profiles = provider_profiles(claims, &self.roster);
        let table = aggregate_shared_revenue(claims, self.rule);
        info!(
            "Found {} patients with multiple providers",
            table.multi_provider_patients
        );

        let edges: Vec<SharedRevenueEdge> = table
            .pairs
            .into_iter()
            .filter(|(_, metrics)| metrics.shared_patients >= self.min_shared_patients)
            .map(|(pair, metrics)| {
                let first = profiles.get(pair.low());
                let second = profiles.get(pair.high());
                let avg_revenue_per_shared_patient = metrics.avg_revenue_per_shared_patient();
                SharedRevenueEdge {
                    first_shared_pct: shared_percentage(
                        metrics.shared_revenue,
                        first.map_or(0.0, |p| p.total_revenue),
                    ),
                    second_shared_pct: shared_percentage(
                        metrics.shared_revenue,
                        second.map_or(0.0, |p| p.total_revenue),
                    ),
                    first_specialty: specialty_of(first),
                    second_specialty: specialty_of(second),
                    shared_patients: metrics.shared_patients,
                    shared_revenue: metrics.shared_revenue,
                    avg_revenue_per_shared_patient,
                    pair,
                }
            })
            .collect();

        let network = ProviderNetwork::from_parts(profiles.into_values().collect(), edges);
        info!(
            "Network: {} providers, {} connections in {:?}",
            network.node_count(),
            network.edge_count(),
            start.elapsed()
        );
        network
    }
}

fn specialty_of(profile: Option<&ProviderProfile>) -> String {
    profile.map_or_else(|| UNKNOWN_SPECIALTY.to_string(), |p| p.specialty.clone())
}

#[derive(Default)]
struct ProfileAccumulator<'a> {
    claims: usize,
    revenue: f64,
    patients: FxHashSet<&'a PatientId>,
    taxonomies: FxHashMap<&'a str, usize>,
}

/// Per-provider claim statistics, keyed and ordered by provider id
///
/// The specialty is the taxonomy that appears on most of the provider's
/// claims (alphabetically first on ties), then the roster taxonomy, then
/// `Unknown`.
#[must_use]
pub fn provider_profiles(
    claims: &[Claim],
    roster: &ProviderRoster,
) -> BTreeMap<ProviderId, ProviderProfile> {
    let mut accumulators: FxHashMap<&ProviderId, ProfileAccumulator<'_>> = FxHashMap::default();
    for claim in claims {
        let acc = accumulators.entry(&claim.provider_id).or_default();
        acc.claims += 1;
        acc.revenue += claim.allowed_amount;
        acc.patients.insert(&claim.patient_id);
        if let Some(taxonomy) = claim.taxonomy.as_deref() {
            *acc.taxonomies.entry(taxonomy).or_insert(0) += 1;
        }
    }

    accumulators
        .into_iter()
        .map(|(id, acc)| {
            let specialty = acc
                .taxonomies
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(taxonomy, _)| (*taxonomy).to_string())
                .or_else(|| roster.taxonomy(id).map(str::to_string))
                .unwrap_or_else(|| UNKNOWN_SPECIALTY.to_string());

            let profile = ProviderProfile {
                id: id.clone(),
                name: roster.display_name(id),
                specialty,
                total_claims: acc.claims,
                total_revenue: acc.revenue,
                unique_patients: acc.patients.len(),
                avg_claim_amount: acc.revenue / acc.claims as f64,
            };
            (id.clone(), profile)
        })
        .collect()
}
