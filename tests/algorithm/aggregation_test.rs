#[cfg(test)]
mod tests {
    use provider_network::{AggregationRule, ProviderId, aggregate_shared_revenue};

    use crate::utils::{assert_close, billings, fixture_claims, patients_by_provider, synthesize};

    #[test]
    fn test_fixture_pairs() {
        let table = aggregate_shared_revenue(&fixture_claims(), AggregationRule::MinMatched);
        let p1 = ProviderId::new("9000000001");
        let p2 = ProviderId::new("9000000002");
        let p3 = ProviderId::new("9000000003");
        let p4 = ProviderId::new("9000000004");

        assert_eq!(table.len(), 2);
        assert_eq!(table.multi_provider_patients, 3);

        let metrics = table.get(&p1, &p2).unwrap();
        assert_eq!(metrics.shared_patients, 2);
        // P1: min(120, 800) + P2: min(90, 60 + 30)
        assert_close(metrics.shared_revenue, 210.0);

        let metrics = table.get(&p3, &p2).unwrap();
        assert_eq!(metrics.shared_patients, 1);
        assert_close(metrics.shared_revenue, 250.0);

        assert!(table.get(&p1, &p3).is_none());
        assert!(table.get(&p1, &p4).is_none());
    }

    #[test]
    fn test_no_pair_without_common_patients() {
        let dataset = synthesize(21);
        let table = aggregate_shared_revenue(&dataset.claims, AggregationRule::MinMatched);
        let patients = patients_by_provider(&dataset.claims);
        let providers: Vec<&String> = patients.keys().collect();

        for (i, a) in providers.iter().enumerate() {
            for b in &providers[i + 1..] {
                let common = patients[*a].intersection(&patients[*b]).count();
                let metrics = table.get(&ProviderId::new(a.as_str()), &ProviderId::new(b.as_str()));
                match metrics {
                    Some(m) => assert_eq!(m.shared_patients, common),
                    None => assert_eq!(common, 0, "missing pair {a}-{b}"),
                }
            }
        }
    }

    #[test]
    fn test_shared_revenue_matches_rule_over_common_patients() {
        let dataset = synthesize(8);
        let by_patient = billings(&dataset.claims);

        for rule in [
            AggregationRule::MinMatched,
            AggregationRule::PairTotal,
            AggregationRule::PatientTotal,
        ] {
            let table = aggregate_shared_revenue(&dataset.claims, rule);
            assert!(!table.is_empty());

            for (pair, metrics) in &table.pairs {
                let (a, b) = (pair.low().to_string(), pair.high().to_string());
                let expected: f64 = by_patient
                    .values()
                    .filter_map(|providers| {
                        let ra = providers.get(&a)?;
                        let rb = providers.get(&b)?;
                        let total: f64 = providers.values().sum();
                        Some(rule.contribution(*ra, *rb, total))
                    })
                    .sum();
                assert_close(metrics.shared_revenue, expected);
            }
        }
    }
}
