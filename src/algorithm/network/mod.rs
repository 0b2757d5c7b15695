//! Provider network graph
//!
//! Providers are nodes and shared-revenue pairs are undirected edges. A
//! network is assembled once by [`NetworkBuilder`] and is read-only after
//! that; derived views such as [`ProviderNetwork::top_by_degree`] produce new
//! networks rather than modifying the original.

pub mod builder;

pub use builder::{NetworkBuilder, provider_profiles};

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::algorithm::aggregation::ProviderPair;
use crate::models::{ProviderId, ProviderProfile};

/// Shared-revenue link between two providers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedRevenueEdge {
    pub pair: ProviderPair,
    pub shared_patients: usize,
    pub shared_revenue: f64,
    pub avg_revenue_per_shared_patient: f64,
    /// Shared revenue as a percentage of the low provider's total revenue
    pub first_shared_pct: f64,
    /// Shared revenue as a percentage of the high provider's total revenue
    pub second_shared_pct: f64,
    pub first_specialty: String,
    pub second_specialty: String,
}

impl SharedRevenueEdge {
    /// Specialty of the endpoint opposite `id`
    #[must_use]
    pub fn specialty_opposite(&self, id: &ProviderId) -> Option<&str> {
        if self.pair.low() == id {
            Some(&self.second_specialty)
        } else if self.pair.high() == id {
            Some(&self.first_specialty)
        } else {
            None
        }
    }
}

/// Percentage of `total` made up by `part`, with totals below one treated as one
#[must_use]
pub fn shared_percentage(part: f64, total: f64) -> f64 {
    part / total.max(1.0) * 100.0
}

/// A provider together with its shared-revenue aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderNode {
    pub profile: ProviderProfile,
    pub degree: usize,
    /// Sum of shared patients over incident edges
    pub shared_patients: usize,
    /// Sum of shared revenue over incident edges
    pub shared_revenue: f64,
    pub shared_revenue_pct: f64,
}

impl ProviderNode {
    fn isolated(profile: ProviderProfile) -> Self {
        Self {
            profile,
            degree: 0,
            shared_patients: 0,
            shared_revenue: 0.0,
            shared_revenue_pct: 0.0,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ProviderId {
        &self.profile.id
    }
}

/// Undirected provider graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderNetwork {
    nodes: BTreeMap<ProviderId, ProviderNode>,
    edges: Vec<SharedRevenueEdge>,
    /// Edge indices incident to each provider
    adjacency: BTreeMap<ProviderId, Vec<usize>>,
}

impl ProviderNetwork {
    /// Assemble a network, computing node aggregates from the edges
    ///
    /// Edges whose endpoints are not both among `profiles` are dropped.
    #[must_use]
    pub fn from_parts(profiles: Vec<ProviderProfile>, edges: Vec<SharedRevenueEdge>) -> Self {
        let mut nodes: BTreeMap<ProviderId, ProviderNode> = profiles
            .into_iter()
            .map(|p| (p.id.clone(), ProviderNode::isolated(p)))
            .collect();

        let mut edges: Vec<SharedRevenueEdge> = edges
            .into_iter()
            .filter(|e| nodes.contains_key(e.pair.low()) && nodes.contains_key(e.pair.high()))
            .collect();
        edges.sort_by(|a, b| a.pair.cmp(&b.pair));

        let mut adjacency: BTreeMap<ProviderId, Vec<usize>> = BTreeMap::new();
        for (idx, edge) in edges.iter().enumerate() {
            for endpoint in [edge.pair.low(), edge.pair.high()] {
                adjacency.entry(endpoint.clone()).or_default().push(idx);
                if let Some(node) = nodes.get_mut(endpoint) {
                    node.degree += 1;
                    node.shared_patients += edge.shared_patients;
                    node.shared_revenue += edge.shared_revenue;
                }
            }
        }

        for node in nodes.values_mut() {
            node.shared_revenue_pct =
                shared_percentage(node.shared_revenue, node.profile.total_revenue);
        }

        Self {
            nodes,
            edges,
            adjacency,
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in provider id order
    pub fn nodes(&self) -> impl Iterator<Item = &ProviderNode> {
        self.nodes.values()
    }

    /// Edges in pair order
    #[must_use]
    pub fn edges(&self) -> &[SharedRevenueEdge] {
        &self.edges
    }

    #[must_use]
    pub fn node(&self, id: &ProviderId) -> Option<&ProviderNode> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProviderId) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn degree(&self, id: &ProviderId) -> usize {
        self.adjacency.get(id).map_or(0, Vec::len)
    }

    /// Edge between two providers, in either argument order
    #[must_use]
    pub fn edge(&self, a: &ProviderId, b: &ProviderId) -> Option<&SharedRevenueEdge> {
        let pair = ProviderPair::new(a.clone(), b.clone()).ok()?;
        self.edges
            .binary_search_by(|e| e.pair.cmp(&pair))
            .ok()
            .map(|idx| &self.edges[idx])
    }

    /// Edges incident to a provider
    pub fn incident_edges<'a>(
        &'a self,
        id: &ProviderId,
    ) -> impl Iterator<Item = &'a SharedRevenueEdge> + 'a {
        self.adjacency
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.edges[idx])
    }

    /// Neighbors of a provider with the connecting edge
    pub fn neighbors<'a>(
        &'a self,
        id: &'a ProviderId,
    ) -> impl Iterator<Item = (&'a ProviderId, &'a SharedRevenueEdge)> + 'a {
        self.incident_edges(id)
            .filter_map(move |edge| edge.pair.other(id).map(|other| (other, edge)))
    }

    /// Induced subgraph on the `limit` highest-degree providers
    ///
    /// Ties in degree are broken by provider id. Node aggregates are
    /// recomputed from the edges that survive.
    #[must_use]
    pub fn top_by_degree(&self, limit: usize) -> Self {
        let mut ranked: Vec<&ProviderNode> = self.nodes.values().collect();
        ranked.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.id().cmp(b.id())));

        let kept: BTreeSet<&ProviderId> = ranked.iter().take(limit).map(|n| n.id()).collect();
        let profiles = ranked
            .iter()
            .take(limit)
            .map(|n| n.profile.clone())
            .collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| kept.contains(e.pair.low()) && kept.contains(e.pair.high()))
            .cloned()
            .collect();

        Self::from_parts(profiles, edges)
    }
}
