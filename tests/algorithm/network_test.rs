#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use provider_network::{NetworkBuilder, NetworkConfig, ProviderId, ProviderRoster};

    use crate::utils::{assert_close, fixture_claims, fixture_roster, synthesize};

    #[test]
    fn test_node_count_equals_distinct_providers() {
        let network = NetworkBuilder::default().build(&fixture_claims());
        assert_eq!(network.node_count(), 4);
        assert_eq!(network.edge_count(), 2);

        let dataset = synthesize(17);
        let distinct: HashSet<&ProviderId> =
            dataset.claims.iter().map(|c| &c.provider_id).collect();
        let network = NetworkBuilder::default().build(&dataset.claims);
        assert_eq!(network.node_count(), distinct.len());
    }

    #[test]
    fn test_every_edge_has_shared_patients() {
        let dataset = synthesize(4);
        let network = NetworkBuilder::default().build(&dataset.claims);

        assert!(network.edge_count() > 0);
        for edge in network.edges() {
            assert!(edge.shared_patients >= 1);
            assert!(edge.pair.low() < edge.pair.high());
        }
    }

    #[test]
    fn test_roster_names_and_fallbacks() {
        let network = NetworkBuilder::default()
            .with_roster(ProviderRoster::from_entries(&fixture_roster()))
            .build(&fixture_claims());

        let name = |id: &str| {
            network
                .node(&ProviderId::new(id))
                .unwrap()
                .profile
                .name
                .clone()
        };
        assert_eq!(name("9000000001"), "Avery Holt MD");
        assert_eq!(name("9000000002"), "Lakeshore Heart Associates");
        assert_eq!(name("9000000003"), "Provider 9000000003");
    }

    #[test]
    fn test_node_profile_and_shared_totals() {
        let network = NetworkBuilder::default().build(&fixture_claims());
        let hub = network.node(&ProviderId::new("9000000002")).unwrap();

        assert_eq!(hub.profile.specialty, "Cardiovascular Disease");
        assert_eq!(hub.profile.total_claims, 4);
        assert_eq!(hub.profile.unique_patients, 3);
        assert_close(hub.profile.total_revenue, 1290.0);
        assert_eq!(hub.degree, 2);
        assert_eq!(hub.shared_patients, 3);
        assert_close(hub.shared_revenue, 460.0);

        let loner = network.node(&ProviderId::new("9000000004")).unwrap();
        assert_eq!(loner.degree, 0);
        assert_eq!(loner.shared_revenue, 0.0);
    }

    #[test]
    fn test_min_shared_patients_from_config() {
        let config = NetworkConfig::builder()
            .min_shared_patients(2)
            .build()
            .unwrap();
        let network = NetworkBuilder::new(&config).build(&fixture_claims());

        assert_eq!(network.node_count(), 4);
        assert_eq!(network.edge_count(), 1);
        let edge = network.edge(&ProviderId::new("9000000002"), &ProviderId::new("9000000001"));
        assert!(edge.is_some());
    }

    #[test]
    fn test_display_subset_limits_nodes() {
        let dataset = synthesize(9);
        let network = NetworkBuilder::default().build(&dataset.claims);
        let subset = network.top_by_degree(10);

        assert_eq!(subset.node_count(), 10);
        let min_kept = subset
            .nodes()
            .map(|n| network.degree(n.id()))
            .min()
            .unwrap();
        for node in network.nodes() {
            if !subset.contains(node.id()) {
                assert!(network.degree(node.id()) <= min_kept);
            }
        }
        for edge in subset.edges() {
            assert!(subset.contains(edge.pair.low()) && subset.contains(edge.pair.high()));
        }
    }

    #[test]
    fn test_empty_claims_give_empty_network() {
        let network = NetworkBuilder::default().build(&[]);
        assert!(network.is_empty());
        assert_eq!(network.edge_count(), 0);
    }
}
