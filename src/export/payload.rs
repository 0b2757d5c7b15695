//! Serializable view of a laid-out network

use serde::Serialize;

use crate::algorithm::layout::{Layout, Position};
use crate::algorithm::network::ProviderNetwork;
use crate::algorithm::statistics::NetworkStatistics;
use crate::models::ProviderId;

/// One neighbor of a node, as listed in the connection table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionView {
    pub neighbor: String,
    pub neighbor_label: String,
    pub shared_patients: usize,
    pub shared_revenue: f64,
    pub avg_revenue: f64,
    /// Specialty of the neighbor
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub specialty: String,
    pub total_claims: usize,
    pub total_patients: usize,
    pub total_revenue: f64,
    pub avg_claim_amount: f64,
    pub shared_patients: usize,
    pub shared_revenue: f64,
    pub shared_revenue_pct: f64,
    pub degree: usize,
    pub connections: Vec<ConnectionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeView {
    pub node1: String,
    pub node2: String,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub shared_patients: usize,
    pub shared_revenue: f64,
    pub avg_revenue: f64,
    pub provider1_specialty: String,
    pub provider2_specialty: String,
    pub provider1_shared_pct: f64,
    pub provider2_shared_pct: f64,
}

/// Everything the visualization page needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizationPayload {
    pub title: String,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    pub stats: NetworkStatistics,
}

impl VisualizationPayload {
    /// Combine a network with its layout and statistics
    ///
    /// Nodes missing from the layout are placed at the origin.
    #[must_use]
    pub fn assemble(
        network: &ProviderNetwork,
        layout: &Layout,
        stats: NetworkStatistics,
        title: impl Into<String>,
    ) -> Self {
        let position = |id: &ProviderId| layout.position(id).unwrap_or_default();
        let label = |id: &ProviderId| {
            network
                .node(id)
                .map_or_else(|| id.to_string(), |n| n.profile.name.clone())
        };

        let nodes = network
            .nodes()
            .map(|node| {
                let Position { x, y } = position(node.id());
                let connections = network
                    .neighbors(node.id())
                    .map(|(other, edge)| ConnectionView {
                        neighbor: other.to_string(),
                        neighbor_label: label(other),
                        shared_patients: edge.shared_patients,
                        shared_revenue: edge.shared_revenue,
                        avg_revenue: edge.avg_revenue_per_shared_patient,
                        specialty: edge
                            .specialty_opposite(node.id())
                            .unwrap_or_default()
                            .to_string(),
                    })
                    .collect();

                NodeView {
                    id: node.id().to_string(),
                    label: node.profile.name.clone(),
                    x,
                    y,
                    specialty: node.profile.specialty.clone(),
                    total_claims: node.profile.total_claims,
                    total_patients: node.profile.unique_patients,
                    total_revenue: node.profile.total_revenue,
                    avg_claim_amount: node.profile.avg_claim_amount,
                    shared_patients: node.shared_patients,
                    shared_revenue: node.shared_revenue,
                    shared_revenue_pct: node.shared_revenue_pct,
                    degree: node.degree,
                    connections,
                }
            })
            .collect();

        let edges = network
            .edges()
            .iter()
            .map(|edge| {
                let from = position(edge.pair.low());
                let to = position(edge.pair.high());
                EdgeView {
                    node1: edge.pair.low().to_string(),
                    node2: edge.pair.high().to_string(),
                    x0: from.x,
                    y0: from.y,
                    x1: to.x,
                    y1: to.y,
                    shared_patients: edge.shared_patients,
                    shared_revenue: edge.shared_revenue,
                    avg_revenue: edge.avg_revenue_per_shared_patient,
                    provider1_specialty: edge.first_specialty.clone(),
                    provider2_specialty: edge.second_specialty.clone(),
                    provider1_shared_pct: edge.first_shared_pct,
                    provider2_shared_pct: edge.second_shared_pct,
                }
            })
            .collect();

        Self {
            title: title.into(),
            nodes,
            edges,
            stats,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
