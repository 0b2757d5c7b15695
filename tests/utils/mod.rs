use std::collections::{BTreeMap, BTreeSet};

use provider_network::{
    Claim, ClaimsSynthesizer, RosterEntry, SynthesizerConfig, SyntheticDataset,
};

/// Build a claim with a taxonomy
#[must_use]
pub fn claim(id: &str, provider: &str, patient: &str, amount: f64, taxonomy: &str) -> Claim {
    Claim::new(id, provider, patient, amount).with_taxonomy(taxonomy)
}

/// A small hand-built claims table
///
/// 9000000001 and 9000000002 share P1 and P2, 9000000002 and 9000000003
/// share P3, and 9000000004 shares nobody.
#[must_use]
pub fn fixture_claims() -> Vec<Claim> {
    vec![
        claim("C1", "9000000001", "P1", 120.0, "Family Medicine"),
        claim("C2", "9000000002", "P1", 800.0, "Cardiovascular Disease"),
        claim("C3", "9000000001", "P2", 90.0, "Family Medicine"),
        claim("C4", "9000000002", "P2", 60.0, "Cardiovascular Disease"),
        claim("C5", "9000000002", "P2", 30.0, "Cardiovascular Disease"),
        claim("C6", "9000000002", "P3", 400.0, "Cardiovascular Disease"),
        claim("C7", "9000000003", "P3", 250.0, "Radiology"),
        claim("C8", "9000000004", "P4", 75.0, "Dermatology"),
    ]
}

#[must_use]
pub fn fixture_roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry {
            npi: "9000000001".to_string(),
            first_name: Some("Avery".to_string()),
            last_name: Some("Holt".to_string()),
            credential: Some("MD".to_string()),
            ..Default::default()
        },
        RosterEntry {
            npi: "9000000002".to_string(),
            organization_name: Some("Lakeshore Heart Associates".to_string()),
            ..Default::default()
        },
    ]
}

/// Synthesizer config small enough for quick tests
#[must_use]
pub fn small_synth_config(seed: u64) -> SynthesizerConfig {
    SynthesizerConfig::builder()
        .provider_count(40)
        .patient_count(300)
        .seed(seed)
        .build()
        .expect("valid synthesizer config")
}

#[must_use]
pub fn synthesize(seed: u64) -> SyntheticDataset {
    ClaimsSynthesizer::new(small_synth_config(seed))
        .generate()
        .expect("synthesis succeeds")
}

/// Revenue billed per patient per provider, computed directly
#[must_use]
pub fn billings(claims: &[Claim]) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut by_patient: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for claim in claims {
        *by_patient
            .entry(claim.patient_id.to_string())
            .or_default()
            .entry(claim.provider_id.to_string())
            .or_insert(0.0) += claim.allowed_amount;
    }
    by_patient
}

/// Patients seen by each provider, computed directly
#[must_use]
pub fn patients_by_provider(claims: &[Claim]) -> BTreeMap<String, BTreeSet<String>> {
    let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for claim in claims {
        map.entry(claim.provider_id.to_string())
            .or_default()
            .insert(claim.patient_id.to_string());
    }
    map
}

pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-6 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
