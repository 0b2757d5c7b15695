#[cfg(test)]
mod tests {
    use provider_network::{
        ForceDirectedLayout, LayoutConfig, NetworkBuilder, NetworkStatistics, ProviderRoster,
        VisualizationPayload, render_html, write_html, write_json,
    };
    use serde_json::Value;
    use tempfile::TempDir;

    use crate::utils::{fixture_claims, fixture_roster};

    fn fixture_payload(title: &str) -> (VisualizationPayload, provider_network::Layout) {
        let network = NetworkBuilder::default()
            .with_roster(ProviderRoster::from_entries(&fixture_roster()))
            .build(&fixture_claims());
        let layout = ForceDirectedLayout::new(LayoutConfig::default()).compute(&network);
        let stats = NetworkStatistics::calculate(&network);
        (
            VisualizationPayload::assemble(&network, &layout, stats, title),
            layout,
        )
    }

    #[test]
    fn test_payload_coordinates_match_layout() {
        let (payload, layout) = fixture_payload("Fixture");

        assert_eq!(payload.nodes.len(), 4);
        assert_eq!(payload.edges.len(), 2);
        for node in &payload.nodes {
            let position = layout
                .positions()
                .find(|(id, _)| id.as_str() == node.id)
                .map(|(_, p)| *p)
                .unwrap();
            assert_eq!((node.x, node.y), (position.x, position.y));
        }
        for edge in &payload.edges {
            let from = payload.nodes.iter().find(|n| n.id == edge.node1).unwrap();
            let to = payload.nodes.iter().find(|n| n.id == edge.node2).unwrap();
            assert_eq!((edge.x0, edge.y0), (from.x, from.y));
            assert_eq!((edge.x1, edge.y1), (to.x, to.y));
        }
    }

    #[test]
    fn test_connections_mirror_edges() {
        let (payload, _) = fixture_payload("Fixture");
        let hub = payload
            .nodes
            .iter()
            .find(|n| n.id == "9000000002")
            .unwrap();

        assert_eq!(hub.label, "Lakeshore Heart Associates");
        assert_eq!(hub.connections.len(), hub.degree);
        let labels: Vec<&str> = hub
            .connections
            .iter()
            .map(|c| c.neighbor_label.as_str())
            .collect();
        assert!(labels.contains(&"Avery Holt MD"));
        assert!(labels.contains(&"Provider 9000000003"));
    }

    #[test]
    fn test_json_export_parses() {
        let (payload, _) = fixture_payload("Fixture");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("network.json");

        write_json(&payload, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["title"], "Fixture");
        assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
        assert_eq!(value["edges"].as_array().unwrap().len(), 2);
        assert_eq!(value["stats"]["provider_count"], 4);
        assert_eq!(value["stats"]["connection_count"], 2);
    }

    #[test]
    fn test_html_embeds_escaped_payload() {
        let (payload, _) = fixture_payload("Heart </script> & Co");
        let html = render_html(&payload).unwrap();

        assert!(html.contains("<title>Heart &lt;/script&gt; &amp; Co</title>"));
        assert!(!html.contains("__PAYLOAD__"));
        assert!(!html.contains("\"Heart </script>"));
        assert!(html.contains("Lakeshore Heart Associates"));
        assert!(html.contains("plotly"));
    }

    #[test]
    fn test_title_with_template_marker_stays_in_title() {
        let (payload, _) = fixture_payload("Net __PAYLOAD__ __TITLE__");
        let html = render_html(&payload).unwrap();

        assert!(html.contains("<title>Net __PAYLOAD__ __TITLE__</title>"));
        let title_start = html.find("<title>").unwrap();
        let title_end = html.find("</title>").unwrap();
        assert!(!html[title_start..title_end].contains("\"nodes\""));
        assert!(html.contains("\"title\":\"Net __PAYLOAD__ __TITLE__\""));
        assert_eq!(html.matches("const payload = {").count(), 1);
    }

    #[test]
    fn test_html_written_to_new_directory() {
        let (payload, _) = fixture_payload("Fixture");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output/shared_revenue_network.html");

        write_html(&payload, &path).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("9000000004"));
    }
}
