#[cfg(test)]
mod tests {
    use std::fs;

    use provider_network::utils::io::write_claims;
    use provider_network::{NetworkConfig, NetworkError, Pipeline, ProviderId};
    use tempfile::TempDir;

    use crate::utils::{assert_close, fixture_claims, fixture_roster, synthesize};

    const CLAIMS_CSV: &str = "\
claim_id,servicing_provider_npi_number,person_alias,allowed_amount,taxonomy_classification,service_date
C1,9000000001,P1,120.0,Family Medicine,2023-02-01
C2,9000000002,P1,800.0,Cardiovascular Disease,2023-02-03
C3,9000000001,P2,90.0,Family Medicine,2023-03-10
C4,9000000002,P2,90.0,Cardiovascular Disease,2023-03-11
bad1,,P2,10.0,Family Medicine,2023-03-11
bad2,9000000003,P3,not-a-number,Radiology,2023-04-01
bad3,9000000003,P3,-5.0,Radiology,2023-04-01
";

    #[test]
    fn test_run_in_memory() {
        let output = Pipeline::default()
            .run(&fixture_claims(), &fixture_roster())
            .unwrap();

        assert_eq!(output.network.node_count(), 4);
        assert_eq!(output.display_network.node_count(), 4);
        assert_eq!(output.layout.len(), 4);
        assert_eq!(output.statistics.provider_count, 4);
        assert_eq!(output.statistics.connection_count, 2);
        assert_eq!(output.statistics.isolated_provider_count, 1);
        assert_close(output.statistics.total_shared_revenue, 460.0);
        assert_eq!(output.payload.nodes.len(), 4);
    }

    #[test]
    fn test_run_files_skips_malformed_rows() {
        let dir = TempDir::new().unwrap();
        let claims_path = dir.path().join("claims.csv");
        fs::write(&claims_path, CLAIMS_CSV).unwrap();

        let output = Pipeline::default()
            .run_files(&claims_path, None)
            .unwrap();

        assert_eq!(output.network.node_count(), 2);
        assert_eq!(output.network.edge_count(), 1);
        let edge = output
            .network
            .edge(&ProviderId::new("9000000001"), &ProviderId::new("9000000002"))
            .unwrap();
        assert_eq!(edge.shared_patients, 2);
        assert_close(edge.shared_revenue, 210.0);
    }

    #[test]
    fn test_missing_roster_falls_back_to_npi_names() {
        let dir = TempDir::new().unwrap();
        let claims_path = dir.path().join("claims.csv");
        write_claims(&claims_path, &fixture_claims()).unwrap();

        let output = Pipeline::default()
            .run_files(&claims_path, Some(&dir.path().join("missing_roster.csv")))
            .unwrap();

        for node in output.network.nodes() {
            assert_eq!(node.profile.name, format!("Provider {}", node.id()));
        }
    }

    #[test]
    fn test_missing_claims_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.csv");
        let result = Pipeline::default().run_files(&missing, None);
        assert!(matches!(result, Err(NetworkError::Io { .. })));
    }

    #[test]
    fn test_empty_claims_still_export() {
        let dir = TempDir::new().unwrap();
        let output = Pipeline::default().run(&[], &[]).unwrap();

        assert!(output.network.is_empty());
        assert!(output.layout.is_empty());
        assert_eq!(output.statistics.provider_count, 0);
        assert_eq!(output.statistics.density, 0.0);

        let html_path = dir.path().join("empty.html");
        let json_path = dir.path().join("empty.json");
        output.write(&html_path, Some(&json_path)).unwrap();
        let html = fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("\"nodes\":[]"));
        assert!(json_path.exists());
    }

    #[test]
    fn test_display_subset_respects_max_nodes() {
        let config = NetworkConfig::builder()
            .max_display_nodes(12)
            .build()
            .unwrap();
        let output = Pipeline::new(config)
            .run_synthetic(&synthesize(27))
            .unwrap();

        assert!(output.network.node_count() > 12);
        assert_eq!(output.display_network.node_count(), 12);
        assert_eq!(output.payload.nodes.len(), 12);
        assert_eq!(output.layout.len(), 12);
        assert_eq!(output.statistics.provider_count, output.network.node_count());
        assert_eq!(output.payload.stats.provider_count, 12);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = NetworkConfig::default();
        config.layout.scale = 0.0;
        let result = Pipeline::new(config).run(&fixture_claims(), &[]);
        assert!(matches!(result, Err(NetworkError::Config(_))));
    }
}
