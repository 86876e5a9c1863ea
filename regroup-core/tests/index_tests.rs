// Tests for the signal index

use regroup_core::index::{RecordOutcome, SignalIndex};
use regroup_core::{SignalKind, Triple};

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_new_index_is_seeded_with_all_kinds() {
    let index = SignalIndex::new();

    let kinds: Vec<SignalKind> = index.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(
        kinds,
        vec![
            SignalKind::PageTitle,
            SignalKind::ContentLength,
            SignalKind::Server
        ]
    );
    assert!(index.iter().all(|(_, values)| values.is_empty()));
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
}

#[test]
fn test_default_matches_new() {
    assert_eq!(SignalIndex::default(), SignalIndex::new());
}

// ============================================================================
// Record Tests
// ============================================================================

#[test]
fn test_record_new_value() {
    let mut index = SignalIndex::new();

    let outcome = index.record(SignalKind::Server, "Apache", "http://a.example");

    assert_eq!(outcome, RecordOutcome::Added);
    assert_eq!(
        index.urls(SignalKind::Server, "Apache"),
        Some(&["http://a.example".to_string()][..])
    );
}

#[test]
fn test_record_existing_value_appends() {
    let mut index = SignalIndex::new();
    index.record(SignalKind::Server, "Apache", "http://a.example");

    let outcome = index.record(SignalKind::Server, "Apache", "http://b.example");

    assert_eq!(outcome, RecordOutcome::Appended);
    assert_eq!(
        index.urls(SignalKind::Server, "Apache").unwrap(),
        ["http://a.example", "http://b.example"]
    );
}

#[test]
fn test_record_keeps_duplicates() {
    let mut index = SignalIndex::new();
    index.record(SignalKind::PageTitle, "Login", "http://a.example");
    index.record(SignalKind::PageTitle, "Login", "http://a.example");

    let urls = index.urls(SignalKind::PageTitle, "Login").unwrap();
    assert_eq!(urls.len(), 2);
    assert!(urls.iter().all(|url| url == "http://a.example"));
    assert_eq!(index.len(), 2);
}

#[test]
fn test_record_empty_value() {
    let mut index = SignalIndex::new();
    index.record(SignalKind::PageTitle, "", "http://a.example");

    assert_eq!(index.urls(SignalKind::PageTitle, "").unwrap().len(), 1);
}

#[test]
fn test_same_value_different_kinds_are_separate() {
    let mut index = SignalIndex::new();
    index.record(SignalKind::PageTitle, "1234", "http://a.example");
    index.record(SignalKind::ContentLength, "1234", "http://b.example");

    assert_eq!(
        index.urls(SignalKind::PageTitle, "1234").unwrap(),
        ["http://a.example"]
    );
    assert_eq!(
        index.urls(SignalKind::ContentLength, "1234").unwrap(),
        ["http://b.example"]
    );
    assert!(index.urls(SignalKind::Server, "1234").is_none());
}

#[test]
fn test_values_keep_insertion_order() {
    let mut index = SignalIndex::new();
    for value in ["nginx", "Apache", "IIS", "Apache"] {
        index.record(SignalKind::Server, value, "http://x.example");
    }

    let values: Vec<&String> = index.values(SignalKind::Server).unwrap().keys().collect();
    assert_eq!(values, ["nginx", "Apache", "IIS"]);
}

#[test]
fn test_merge_records_all_triples_in_order() {
    let mut index = SignalIndex::new();
    let triples = vec![
        Triple::new(SignalKind::Server, "Apache", "http://a.example"),
        Triple::new(SignalKind::PageTitle, "Home", "http://a.example"),
        Triple::new(SignalKind::Server, "Apache", "http://b.example"),
    ];

    let recorded = index.merge(&triples);

    assert_eq!(recorded, 3);
    assert_eq!(index.len(), 3);
    assert_eq!(
        index.urls(SignalKind::Server, "Apache").unwrap(),
        ["http://a.example", "http://b.example"]
    );
}

// ============================================================================
// Row Iteration Tests
// ============================================================================

#[test]
fn test_rows_follow_kind_then_value_then_url_order() {
    let mut index = SignalIndex::new();
    index.record(SignalKind::Server, "Apache", "http://1.example");
    index.record(SignalKind::PageTitle, "Home", "http://2.example");
    index.record(SignalKind::Server, "nginx", "http://3.example");
    index.record(SignalKind::ContentLength, "42", "http://4.example");
    index.record(SignalKind::Server, "Apache", "http://5.example");

    let rows: Vec<_> = index.rows().collect();

    assert_eq!(
        rows,
        vec![
            (SignalKind::PageTitle, "Home", "http://2.example"),
            (SignalKind::ContentLength, "42", "http://4.example"),
            (SignalKind::Server, "Apache", "http://1.example"),
            (SignalKind::Server, "Apache", "http://5.example"),
            (SignalKind::Server, "nginx", "http://3.example"),
        ]
    );
}

#[test]
fn test_report_exposes_full_index() {
    let mut index = SignalIndex::new();
    index.record(SignalKind::Server, "Apache", "http://a.example");

    let snapshot = index.report();

    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot[&SignalKind::Server]["Apache"], vec!["http://a.example"]);
}

#[test]
fn test_index_serializes_as_nested_mapping() {
    let mut index = SignalIndex::new();
    index.record(SignalKind::ContentLength, "612", "http://a.example");
    index.record(SignalKind::ContentLength, "612", "http://b.example");

    let value = serde_json::to_value(&index).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "page_title": {},
            "content_length": { "612": ["http://a.example", "http://b.example"] },
            "server": {}
        })
    );
}
