//! Network statistics and summaries
//!
//! Totals, counts and specialty breakdowns for a provider network, plus a
//! plain-text summary for the end of a run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::algorithm::network::ProviderNetwork;
use crate::models::ProviderId;

/// Shared revenue above which an edge is in the high tier
pub const HIGH_REVENUE_THRESHOLD: f64 = 20_000.0;
/// Shared revenue above which an edge is in the medium tier
pub const MEDIUM_REVENUE_THRESHOLD: f64 = 10_000.0;

/// Aggregates for one specialty
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialtyStats {
    pub specialty: String,
    pub provider_count: usize,
    /// Sum of each provider's unique patients
    pub patient_count: usize,
    pub total_revenue: f64,
    pub shared_revenue: f64,
}

/// Edge counts by shared-revenue tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RevenueTiers {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// The edge with the most shared revenue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopConnection {
    pub first: String,
    pub second: String,
    pub shared_patients: usize,
    pub shared_revenue: f64,
}

/// Summary statistics for a provider network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStatistics {
    pub provider_count: usize,
    pub connection_count: usize,
    pub isolated_provider_count: usize,
    pub total_claims: usize,
    pub total_revenue: f64,
    pub total_shared_revenue: f64,
    pub avg_shared_patients: f64,
    pub density: f64,
    pub top_connection: Option<TopConnection>,
    pub revenue_tiers: RevenueTiers,
    /// Ordered by specialty name
    pub specialties: Vec<SpecialtyStats>,
}

impl NetworkStatistics {
    /// Calculate statistics for a network
    #[must_use]
    pub fn calculate(network: &ProviderNetwork) -> Self {
        let provider_count = network.node_count();
        let connection_count = network.edge_count();

        let mut specialties: BTreeMap<&str, SpecialtyStats> = BTreeMap::new();
        let mut total_claims = 0;
        let mut total_revenue = 0.0;
        let mut isolated_provider_count = 0;

        for node in network.nodes() {
            let profile = &node.profile;
            total_claims += profile.total_claims;
            total_revenue += profile.total_revenue;
            if node.degree == 0 {
                isolated_provider_count += 1;
            }

            let entry = specialties
                .entry(profile.specialty.as_str())
                .or_insert_with(|| SpecialtyStats {
                    specialty: profile.specialty.clone(),
                    provider_count: 0,
                    patient_count: 0,
                    total_revenue: 0.0,
                    shared_revenue: 0.0,
                });
            entry.provider_count += 1;
            entry.patient_count += profile.unique_patients;
            entry.total_revenue += profile.total_revenue;
            entry.shared_revenue += node.shared_revenue;
        }

        let mut revenue_tiers = RevenueTiers::default();
        let mut total_shared_revenue = 0.0;
        let mut total_shared_patients = 0;
        for edge in network.edges() {
            total_shared_revenue += edge.shared_revenue;
            total_shared_patients += edge.shared_patients;
            if edge.shared_revenue > HIGH_REVENUE_THRESHOLD {
                revenue_tiers.high += 1;
            } else if edge.shared_revenue > MEDIUM_REVENUE_THRESHOLD {
                revenue_tiers.medium += 1;
            } else {
                revenue_tiers.low += 1;
            }
        }

        let top_connection = network
            .edges()
            .iter()
            .max_by(|a, b| {
                a.shared_revenue
                    .total_cmp(&b.shared_revenue)
                    .then_with(|| b.pair.cmp(&a.pair))
            })
            .map(|edge| TopConnection {
                first: display_name(network, edge.pair.low()),
                second: display_name(network, edge.pair.high()),
                shared_patients: edge.shared_patients,
                shared_revenue: edge.shared_revenue,
            });

        let avg_shared_patients = if connection_count > 0 {
            total_shared_patients as f64 / connection_count as f64
        } else {
            0.0
        };

        let density = if provider_count > 1 {
            2.0 * connection_count as f64 / (provider_count * (provider_count - 1)) as f64
        } else {
            0.0
        };

        Self {
            provider_count,
            connection_count,
            isolated_provider_count,
            total_claims,
            total_revenue,
            total_shared_revenue,
            avg_shared_patients,
            density,
            top_connection,
            revenue_tiers,
            specialties: specialties.into_values().collect(),
        }
    }

    /// Generate a plain-text summary
    #[must_use]
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Provider Network Summary:\n");
        summary.push_str(&format!("  Providers: {}\n", self.provider_count));
        summary.push_str(&format!("  Connections: {}\n", self.connection_count));
        summary.push_str(&format!(
            "  Isolated Providers: {}\n",
            self.isolated_provider_count
        ));
        summary.push_str(&format!("  Total Claims: {}\n", self.total_claims));
        summary.push_str(&format!("  Total Revenue: ${:.2}\n", self.total_revenue));
        summary.push_str(&format!(
            "  Total Shared Revenue: ${:.2}\n",
            self.total_shared_revenue
        ));
        summary.push_str(&format!(
            "  Avg Shared Patients: {:.1}\n",
            self.avg_shared_patients
        ));
        summary.push_str(&format!("  Density: {:.4}\n", self.density));

        if let Some(top) = &self.top_connection {
            summary.push_str(&format!(
                "  Top Connection: {} <-> {} ({} patients, ${:.2})\n",
                top.first, top.second, top.shared_patients, top.shared_revenue
            ));
        }

        if self.connection_count > 0 {
            let tiers = &self.revenue_tiers;
            summary.push_str("\nConnections by Shared Revenue:\n");
            summary.push_str(&format!("  High (> $20,000): {}\n", tiers.high));
            summary.push_str(&format!("  Medium (> $10,000): {}\n", tiers.medium));
            summary.push_str(&format!("  Low: {}\n", tiers.low));
        }

        if !self.specialties.is_empty() {
            summary.push_str("\nProviders by Specialty:\n");
            for spec in &self.specialties {
                let percentage = spec.provider_count as f64 / self.provider_count as f64 * 100.0;
                summary.push_str(&format!(
                    "  {}: {} ({percentage:.1}%), revenue ${:.2}, shared ${:.2}\n",
                    spec.specialty, spec.provider_count, spec.total_revenue, spec.shared_revenue
                ));
            }
        }

        summary
    }
}

fn display_name(network: &ProviderNetwork, id: &ProviderId) -> String {
    network
        .node(id)
        .map_or_else(|| id.to_string(), |n| n.profile.name.clone())
}
