//! End-to-end matching over in-memory inventories.

use lci_relink::matching::diagnosis::DiagnosticKind;
use lci_relink::matching::engine::{CandidateDetail, MatchingConfig};
use lci_relink::matching::selector::LocationEquivalence;
use lci_relink::{
    canonical, match_all, ExchangeRecord, ExchangeType, MatchingEngine, ReferenceActivity,
    ReferenceIndex,
};

fn reference_inventory() -> Vec<ReferenceActivity> {
    vec![
        ReferenceActivity::new(
            "market for steel, low-alloyed",
            "steel, low-alloyed",
            "GLO",
            "kg",
        ),
        ReferenceActivity::new(
            "market for electricity, medium voltage",
            "electricity, medium voltage",
            "DE",
            "kWh",
        ),
        ReferenceActivity::new(
            "market for electricity, medium voltage",
            "electricity, medium voltage",
            "FR",
            "kWh",
        ),
        ReferenceActivity::new("market for cement, Portland", "cement, Portland", "CH", "kg"),
        ReferenceActivity::new("market for cement, Portland", "cement, Portland", "RoW", "kg"),
        ReferenceActivity::new("market for cement, Portland", "cement, Portland", "GLO", "kg"),
        ReferenceActivity::new("tap water production", "tap water", "Europe without Switzerland", "kg"),
        ReferenceActivity::new("sawnwood, softwood, raw", "sawnwood, softwood, raw", "RER", "m3"),
    ]
}

fn source_exchanges() -> Vec<ExchangeRecord> {
    vec![
        // Matched via combined key, RoW exchange against GLO activity
        ExchangeRecord::technosphere(
            "Steel, low-alloyed {RoW}| market for steel, low-alloyed | Cutoff, U",
            "kg",
        ),
        // Matched by location among homonyms, stray brace tolerated
        ExchangeRecord::technosphere(
            "Electricity, medium voltage {FR}}| market for electricity, medium voltage | Cutoff, U",
            "kWh",
        ),
        // GLO and RoW both compatible with GLO: ambiguous
        ExchangeRecord::technosphere(
            "Cement, Portland {GLO}| market for cement, Portland | Cutoff, U",
            "kg",
        ),
        // Bucket found via suffix, wrong reference product
        ExchangeRecord::technosphere(
            "Water, deionised {Europe without Switzerland}| tap water production | Cutoff, U",
            "kg",
        ),
        // Matched via reference-name key, unit differs
        ExchangeRecord::technosphere(
            "Sawnwood, softwood, raw {RER}| sawing, softwood | Cutoff, U",
            "kg",
        ),
        // Nothing similar
        ExchangeRecord::technosphere("Gold {GLO}| market for gold | Cutoff, U", "kg"),
        // Irregular names
        ExchangeRecord::new("Carbon dioxide, fossil", "kg", ExchangeType::Biosphere),
        ExchangeRecord::technosphere("Transport, lorry {RER}| lorry", "tkm"),
        // Composite but not technosphere
        ExchangeRecord::new(
            "Steel, low-alloyed {RoW}| market for steel, low-alloyed | Cutoff, U",
            "kg",
            ExchangeType::Production,
        ),
    ]
}

#[test]
fn test_full_run_outcomes() {
    let report = match_all(&source_exchanges(), &reference_inventory());

    assert_eq!(report.stats.total, 9);
    assert_eq!(report.stats.matched, 3);
    assert_eq!(report.stats.ambiguous, 1);
    assert_eq!(report.stats.not_found, 1);
    assert_eq!(report.stats.no_bucket, 1);
    assert_eq!(report.stats.irregular, 2);
    assert_eq!(report.stats.skipped, 1);
    assert_eq!(report.stats.unit_mismatches, 1);
    assert_eq!(report.stats.unmatched(), 3);

    let steel = &report.matches["Steel, low-alloyed {RoW}| market for steel, low-alloyed | Cutoff, U"];
    assert_eq!(steel.matched.location, "GLO");

    let electricity = &report.matches
        ["Electricity, medium voltage {FR}}| market for electricity, medium voltage | Cutoff, U"];
    assert_eq!(electricity.matched.location, "FR");

    let sawnwood = &report.matches["Sawnwood, softwood, raw {RER}| sawing, softwood | Cutoff, U"];
    assert_eq!(sawnwood.matched.unit, "m3");

    assert_eq!(
        report.irregular,
        vec![
            "Carbon dioxide, fossil".to_string(),
            "Transport, lorry {RER}| lorry".to_string()
        ]
    );
}

#[test]
fn test_diagnostics_in_processing_order() {
    let report = match_all(&source_exchanges(), &reference_inventory());
    let kinds: Vec<DiagnosticKind> = report.diagnostics.iter().map(|d| d.kind).collect();

    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::Ambiguous,
            DiagnosticKind::NotFound,
            DiagnosticKind::UnitMismatch,
            DiagnosticKind::NoBucket,
            DiagnosticKind::Irregular,
            DiagnosticKind::Irregular,
        ]
    );

    let not_found = &report.diagnostics[1];
    assert_eq!(not_found.context.candidates.len(), 1);
    assert_eq!(not_found.context.candidates[0].canonical_product, "tap water");
    assert_eq!(not_found.context.location.as_deref(), Some("Europe without Switzerland"));
}

#[test]
fn test_irregular_never_ambiguous_or_matched() {
    let report = match_all(&source_exchanges(), &reference_inventory());
    for name in &report.irregular {
        assert!(!report.matches.contains_key(name));
        assert!(report
            .diagnostics
            .iter()
            .filter(|d| &d.context.source_name == name)
            .all(|d| d.kind == DiagnosticKind::Irregular));
    }
}

#[test]
fn test_input_order_does_not_change_matches() {
    let mut reversed_reference = reference_inventory();
    reversed_reference.reverse();
    let mut reversed_exchanges = source_exchanges();
    reversed_exchanges.reverse();

    let forward = match_all(&source_exchanges(), &reference_inventory());
    let backward = match_all(&reversed_exchanges, &reversed_reference);
    assert_eq!(forward.matches, backward.matches);
    assert_eq!(forward.stats, backward.stats);
}

#[test]
fn test_wider_global_class_changes_compatibility() {
    let reference = vec![ReferenceActivity::new("market for gravel", "gravel", "RER", "kg")];
    let index = ReferenceIndex::build(&reference);
    let exchanges = vec![ExchangeRecord::technosphere(
        "Gravel {GLO}| market for gravel | Cutoff, U",
        "kg",
    )];

    assert!(MatchingEngine::new(&index).match_all(&exchanges).matches.is_empty());

    let config = MatchingConfig {
        locations: LocationEquivalence::new(["GLO", "RoW", "RER"]),
        candidate_detail: CandidateDetail::MatchOnly,
    };
    let report = MatchingEngine::with_config(&index, config).match_all(&exchanges);
    assert_eq!(report.matches.len(), 1);
}

#[test]
fn test_index_bucket_invariant() {
    let reference = reference_inventory();
    let index = ReferenceIndex::build(&reference);
    for activity in &reference {
        let bucket = index.get(&canonical(&activity.name)).unwrap();
        assert!(bucket.contains(activity));
    }
    assert_eq!(index.activity_count(), reference.len());
}
