//! Integration tests for the evidence-store adapter over seeded
//! in-memory databases.

use semdag_core::types::SentenceRef;
use semdag_storage::test_support::{repeated_evidence, seeded_store, PredicationRow, SentenceRow};
use semdag_storage::HopSeed;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

const CAUSES: &[&str] = &["CAUSES"];

#[test]
fn first_hop_groups_by_triple_and_counts_distinct_pmids() {
    let (mut predications, sentences) =
        repeated_evidence("C0011570", "Depression", "C0002395", "Alzheimer Disease", 3, 1000);
    // A duplicate citation of the same pmid must not inflate the count.
    predications.push(PredicationRow::causes(
        "C0011570",
        "Depression",
        "C0002395",
        "Alzheimer Disease",
        "1000",
        "s_dup",
    ));
    let store = seeded_store(&predications, &sentences);

    let assertions = store
        .expand_hop(
            HopSeed::Targets {
                exposures: &strings(&["C0011570"]),
                outcomes: &strings(&["C0002395"]),
            },
            &strings(CAUSES),
            2,
            &[],
            1,
        )
        .unwrap();

    assert_eq!(assertions.len(), 1);
    let a = &assertions[0];
    assert_eq!(a.subject_cui, "C0011570");
    assert_eq!(a.object_cui, "C0002395");
    assert_eq!(a.evidence_count, 3);
    assert_eq!(a.pmids, vec!["1000", "1001", "1002"]);
    assert_eq!(a.hop_level, 1);
    // Four citations, one of which shares a pmid, give four sentence refs.
    assert_eq!(a.sentence_refs.len(), 4);
}

#[test]
fn threshold_filters_underpowered_triples() {
    let (mut predications, mut sentences) =
        repeated_evidence("C0011570", "Depression", "C0002395", "Alzheimer Disease", 5, 1000);
    let (weak_p, weak_s) =
        repeated_evidence("C0011570", "Depression", "C0027051", "Myocardial Infarction", 2, 2000);
    predications.extend(weak_p);
    sentences.extend(weak_s);
    let store = seeded_store(&predications, &sentences);

    let assertions = store
        .expand_hop(
            HopSeed::Targets {
                exposures: &strings(&["C0011570"]),
                outcomes: &strings(&["C0002395"]),
            },
            &strings(CAUSES),
            5,
            &[],
            1,
        )
        .unwrap();

    assert_eq!(assertions.len(), 1);
    assert!(assertions.iter().all(|a| a.evidence_count >= 5));
}

#[test]
fn blocklist_drops_triples_on_either_endpoint() {
    let (mut predications, mut sentences) =
        repeated_evidence("C0011570", "Depression", "C0002395", "Alzheimer Disease", 5, 1000);
    let (blocked_p, blocked_s) =
        repeated_evidence("C0030705", "Patients", "C0002395", "Alzheimer Disease", 5, 2000);
    predications.extend(blocked_p);
    sentences.extend(blocked_s);
    let store = seeded_store(&predications, &sentences);

    let assertions = store
        .expand_hop(
            HopSeed::Targets {
                exposures: &strings(&["C0011570"]),
                outcomes: &strings(&["C0002395"]),
            },
            &strings(CAUSES),
            5,
            &strings(&["C0030705"]),
            1,
        )
        .unwrap();

    assert_eq!(assertions.len(), 1);
    assert!(assertions
        .iter()
        .all(|a| a.subject_cui != "C0030705" && a.object_cui != "C0030705"));
}

#[test]
fn excluded_semantic_types_never_surface() {
    let (mut predications, sentences) =
        repeated_evidence("C0011570", "Depression", "C0002395", "Alzheimer Disease", 5, 1000);
    for i in 0..5 {
        predications.push(
            PredicationRow::causes(
                "C0949766",
                "Cognitive testing",
                "C0002395",
                "Alzheimer Disease",
                &format!("{}", 3000 + i),
                &format!("s{}", 3000 + i),
            )
            .with_subject_semtype("acty"),
        );
    }
    let store = seeded_store(&predications, &sentences);

    let assertions = store
        .expand_hop(
            HopSeed::Targets {
                exposures: &strings(&["C0011570"]),
                outcomes: &strings(&["C0002395"]),
            },
            &strings(CAUSES),
            5,
            &[],
            1,
        )
        .unwrap();

    assert_eq!(assertions.len(), 1);
    assert_eq!(assertions[0].subject_cui, "C0011570");
}

#[test]
fn predicate_filter_is_exact() {
    let (mut predications, sentences) =
        repeated_evidence("C0011570", "Depression", "C0002395", "Alzheimer Disease", 5, 1000);
    for p in &mut predications[3..] {
        *p = p.clone().with_predicate("TREATS");
    }
    let store = seeded_store(&predications, &sentences);

    let causes_only = store
        .expand_hop(
            HopSeed::Targets {
                exposures: &strings(&["C0011570"]),
                outcomes: &strings(&["C0002395"]),
            },
            &strings(CAUSES),
            4,
            &[],
            1,
        )
        .unwrap();
    assert!(causes_only.is_empty());

    let both = store
        .expand_hop(
            HopSeed::Targets {
                exposures: &strings(&["C0011570"]),
                outcomes: &strings(&["C0002395"]),
            },
            &strings(&["CAUSES", "TREATS"]),
            2,
            &[],
            1,
        )
        .unwrap();
    // One triple per predicate after grouping.
    assert_eq!(both.len(), 2);
}

#[test]
fn next_hop_expands_from_frontier_only() {
    let (mut predications, mut sentences) =
        repeated_evidence("C0011570", "Depression", "C0002395", "Alzheimer Disease", 5, 1000);
    let (hop2_p, hop2_s) =
        repeated_evidence("C0021655", "Insulin Resistance", "C0011570", "Depression", 5, 2000);
    let (far_p, far_s) = repeated_evidence("C0001418", "Adenoma", "C0006826", "Neoplasm", 5, 3000);
    predications.extend(hop2_p);
    sentences.extend(hop2_s);
    predications.extend(far_p);
    sentences.extend(far_s);
    let store = seeded_store(&predications, &sentences);

    let frontier = strings(&["C0011570", "C0002395"]);
    let hop2 = store
        .expand_hop(HopSeed::Frontier(&frontier), &strings(CAUSES), 5, &[], 2)
        .unwrap();

    assert_eq!(hop2.len(), 2);
    assert!(hop2
        .iter()
        .all(|a| frontier.contains(&a.subject_cui) || frontier.contains(&a.object_cui)));
    assert!(hop2.iter().all(|a| a.hop_level == 2));
}

#[test]
fn hop_results_are_ordered_by_subject_name() {
    let (mut predications, mut sentences) =
        repeated_evidence("C0040038", "Thrombosis", "C0011570", "Depression", 5, 1000);
    let (p2, s2) = repeated_evidence("C0002871", "Anemia", "C0011570", "Depression", 5, 2000);
    predications.extend(p2);
    sentences.extend(s2);
    let store = seeded_store(&predications, &sentences);

    let assertions = store
        .expand_hop(
            HopSeed::Targets {
                exposures: &strings(&["C0011570"]),
                outcomes: &strings(&["C0002395"]),
            },
            &strings(CAUSES),
            5,
            &[],
            1,
        )
        .unwrap();

    let subjects: Vec<&str> = assertions.iter().map(|a| a.subject_name.as_str()).collect();
    assert_eq!(subjects, vec!["Anemia", "Thrombosis"]);
}

#[test]
fn preflight_reports_evidence_presence() {
    let (predications, sentences) =
        repeated_evidence("C0011570", "Depression", "C0002395", "Alzheimer Disease", 5, 1000);
    let store = seeded_store(&predications, &sentences);

    assert!(store
        .evidence_exists(
            &strings(&["C0011570"]),
            &strings(&["C0002395"]),
            &strings(CAUSES),
            5,
        )
        .unwrap());
    assert!(!store
        .evidence_exists(
            &strings(&["C0011570"]),
            &strings(&["C0002395"]),
            &strings(CAUSES),
            1_000_000_000,
        )
        .unwrap());
    assert!(!store
        .evidence_exists(
            &strings(&["C9999999"]),
            &strings(&["C8888888"]),
            &strings(CAUSES),
            1,
        )
        .unwrap());
}

#[test]
fn empty_predicates_is_a_query_error() {
    let store = seeded_store(&[], &[]);
    let err = store
        .evidence_exists(&strings(&["C1"]), &strings(&["C2"]), &[], 1)
        .unwrap_err();
    assert!(err.to_string().contains("empty predicate set"));
}

#[test]
fn sentences_are_fetched_by_ref_and_deduplicated_per_pmid() {
    let sentences = vec![
        SentenceRow::new("1000", "s1", "Depression causes dementia.", "C0011570", "Depression"),
        SentenceRow::new("1000", "s2", "Depression causes dementia.", "C0011570", "Depression"),
        SentenceRow::new("1000", "s3", "A different sentence.", "C0011570", "Depression"),
        SentenceRow::new("2000", "s4", "Unrelated pmid.", "C0002395", "Alzheimer Disease"),
    ];
    let store = seeded_store(&[], &sentences);

    let refs = vec![
        SentenceRef { pmid: "1000".into(), sentence_id: "s1".into() },
        SentenceRef { pmid: "1000".into(), sentence_id: "s2".into() },
        SentenceRef { pmid: "1000".into(), sentence_id: "s3".into() },
    ];
    let by_pmid = store.fetch_sentences(&refs).unwrap();

    assert_eq!(by_pmid.len(), 1);
    let texts = &by_pmid["1000"];
    assert_eq!(texts.len(), 2);
    assert!(texts.contains(&"Depression causes dementia.".to_string()));
    assert!(texts.contains(&"A different sentence.".to_string()));
}

#[test]
fn canonical_names_pick_first_lexicographic_on_ties() {
    let sentences = vec![
        SentenceRow::new("1", "s1", "text", "C0011570", "Major Depression"),
        SentenceRow::new("2", "s2", "text", "C0011570", "Depression"),
        SentenceRow::new("3", "s3", "text", "C0002395", "Alzheimer Disease"),
    ];
    let store = seeded_store(&[], &sentences);

    let names = store
        .fetch_canonical_names(&strings(&["C0011570", "C0002395"]))
        .unwrap();
    assert_eq!(names["C0011570"], "Depression");
    assert_eq!(names["C0002395"], "Alzheimer Disease");
}

#[test]
fn markov_legs_find_parents_children_and_spouses() {
    let target = "C0002395";
    let mut predications = Vec::new();
    let mut sentences = Vec::new();
    // Parents: p1 -> t, p2 -> t.
    for (cui, name, base) in [
        ("C0011570", "Depression", 1000),
        ("C0020538", "Hypertension", 1100),
    ] {
        let (p, s) = repeated_evidence(cui, name, target, "Alzheimer Disease", 5, base);
        predications.extend(p);
        sentences.extend(s);
    }
    // Child: t -> c1.
    let (p, s) = repeated_evidence(target, "Alzheimer Disease", "C0011265", "Dementia", 5, 1200);
    predications.extend(p);
    sentences.extend(s);
    // Spouse: s1 -> c1, plus t -> c1 again under a second surface name
    // (the self-spouse that must be excluded).
    let (p, s) = repeated_evidence("C0038454", "Stroke", "C0011265", "Dementia", 5, 1300);
    predications.extend(p);
    sentences.extend(s);
    let (p, s) = repeated_evidence(target, "Alzheimers", "C0011265", "Dementia", 5, 1400);
    predications.extend(p);
    sentences.extend(s);
    let store = seeded_store(&predications, &sentences);

    let causes = strings(CAUSES);
    let parents = store.mb_parents(target, &causes, 5, &[]).unwrap();
    assert_eq!(parents, vec!["Depression", "Hypertension"]);

    let children = store.mb_children(target, &causes, 5, &[]).unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0], ("Dementia".to_string(), "C0011265".to_string()));

    let child_cuis = strings(&["C0011265"]);
    let spouses = store.mb_spouses(target, &child_cuis, &causes, 5, &[]).unwrap();
    assert_eq!(spouses, vec!["Stroke"]);
}

#[test]
fn markov_legs_honor_blocklist() {
    let target = "C0002395";
    let (mut predications, mut sentences) =
        repeated_evidence("C0011570", "Depression", target, "Alzheimer Disease", 5, 1000);
    let (p, s) = repeated_evidence("C0030705", "Patients", target, "Alzheimer Disease", 5, 2000);
    predications.extend(p);
    sentences.extend(s);
    let store = seeded_store(&predications, &sentences);

    let parents = store
        .mb_parents(target, &strings(CAUSES), 5, &strings(&["C0030705"]))
        .unwrap();
    assert_eq!(parents, vec!["Depression"]);
}
