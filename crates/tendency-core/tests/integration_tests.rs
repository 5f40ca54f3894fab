//! Integration tests for tendency-core
//!
//! These tests exercise the full import -> mine -> suppress -> persist
//! workflow across module boundaries.

use std::collections::BTreeSet;

use tendency_core::{
    import::parse_csv, Attribute, CorrelationMatrix, InsightEngine, InsightStore,
    PersonRepository, Strength,
};

/// 4 Windows users (3 Night, 1 Morning) plus 1 MacOS Night user, with
/// enough colors/hobbies to light up the color pairing too.
fn classroom_csv() -> &'static str {
    "id,graduationYear,region,primaryOS,engineeringFocus,studyTime,courseLoad,favoriteColors,hobbies,languages\n\
     w1,2026,us-northeast,Windows,software,Night,4,blue,gaming,english\n\
     w2,2026,us-northeast,Windows,software,Night,4,blue,gaming,english\n\
     w3,2027,us-west,Windows,software,Night,5,blue,gaming,english\n\
     w4,2027,us-west,Windows,software,Morning,5,green,reading,english\n\
     m1,2026,china,MacOS,electronics,Night,3,green,reading,mandarin"
}

#[test]
fn test_import_then_generate() {
    let persons = parse_csv(classroom_csv().as_bytes()).expect("CSV should parse");
    assert_eq!(persons.len(), 5);

    let engine = InsightEngine::new();
    let insights = engine.generate(&persons, &BTreeSet::new());

    // OS pairing: Windows cohort of 4, 3 at Night, 5 eligible total
    let windows = insights
        .iter()
        .find(|i| i.key == "primary_os = Windows -> study_time = Night")
        .expect("Windows/Night insight expected");
    assert_eq!(windows.support, 3);
    assert_eq!(windows.population, 4);
    assert_eq!(windows.score, 71);
    assert_eq!(
        windows.description,
        "People whose primary OS is Windows tend to study in the nights."
    );

    // color pairing: 3 blue gamers clear the looser color thresholds
    assert!(insights
        .iter()
        .any(|i| i.key == "favorite_color = blue -> hobby = gaming"));

    // listing is fully ordered: no adjacent pair compares equal
    for window in insights.windows(2) {
        let a = (&window[0], &window[1]);
        assert!(
            a.0.score > a.1.score
                || a.0.support >= a.1.support
                || a.0.description < a.1.description,
            "sort left {} and {} unordered",
            a.0.key,
            a.1.key
        );
        assert_ne!(window[0].key, window[1].key);
    }
}

#[test]
fn test_blocked_keys_survive_a_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let blocked_path = dir.path().join("blocked_keys.txt");

    let persons = parse_csv(classroom_csv().as_bytes()).unwrap();
    let engine = InsightEngine::new();

    // first session: user discards the Windows/Night insight
    let mut store = InsightStore::new();
    store.add_blocked_key("primary_os = Windows -> study_time = Night");
    store.save_blocked(&blocked_path).unwrap();

    // next session: the block loads back and the key never resurfaces
    let mut next = InsightStore::new();
    next.load_blocked(&blocked_path).unwrap();
    let insights = engine.generate(&persons, next.blocked_keys());

    assert!(!insights.is_empty());
    assert!(insights
        .iter()
        .all(|i| i.key != "primary_os = Windows -> study_time = Night"));
}

#[test]
fn test_retained_insights_accumulate_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let useful_path = dir.path().join("useful_insights.csv");

    let persons = parse_csv(classroom_csv().as_bytes()).unwrap();
    let engine = InsightEngine::new();
    let generated = engine.generate(&persons, &BTreeSet::new());
    assert!(generated.len() >= 2);

    let mut store = InsightStore::new();
    store.save_useful(&generated[..1], &useful_path).unwrap();
    store.save_useful(&generated[1..2], &useful_path).unwrap();

    let mut reloaded = InsightStore::new();
    reloaded.load_useful(&useful_path).unwrap();
    assert_eq!(reloaded.useful().len(), 2);
    assert_eq!(reloaded.useful()[0], generated[0]);
    assert_eq!(reloaded.useful()[1], generated[1]);
}

#[test]
fn test_repository_export_feeds_the_engine_identically() {
    let persons = parse_csv(classroom_csv().as_bytes()).unwrap();

    let mut repo = PersonRepository::new();
    repo.set_persons(persons.clone());

    let mut buffer = Vec::new();
    repo.write_csv(&mut buffer).unwrap();
    let reloaded = parse_csv(buffer.as_slice()).unwrap();

    let engine = InsightEngine::new();
    let blocked = BTreeSet::new();
    assert_eq!(
        engine.generate(&persons, &blocked),
        engine.generate(&reloaded, &blocked)
    );
}

#[test]
fn test_matrix_over_os_and_study() {
    let persons = parse_csv(classroom_csv().as_bytes()).unwrap();
    let engine = InsightEngine::new();

    let attrs = [Attribute::Os, Attribute::Study];
    let matrix = CorrelationMatrix::build(&engine, &persons, &BTreeSet::new(), &attrs);

    // 2x2 grid: diagonal sentinels, symmetric off-diagonal cells
    assert_eq!(matrix.cell(Attribute::Os, Attribute::Os), None);
    assert_eq!(matrix.cell(Attribute::Study, Attribute::Study), None);
    let cell = matrix.cell(Attribute::Os, Attribute::Study);
    assert!(cell.is_some());
    assert_eq!(cell, matrix.cell(Attribute::Study, Attribute::Os));

    assert_eq!(matrix.ranked().len(), 1);
    let pair = &matrix.ranked()[0];
    assert!(pair.insight_count >= 1);
    assert!(matches!(
        pair.strength(),
        Strength::Weak | Strength::Moderate | Strength::Strong
    ));
}

#[test]
fn test_full_matrix_symmetry() {
    let persons = parse_csv(classroom_csv().as_bytes()).unwrap();
    let engine = InsightEngine::new();
    let matrix = CorrelationMatrix::build(&engine, &persons, &BTreeSet::new(), &Attribute::ALL);

    for &a in matrix.attributes() {
        for &b in matrix.attributes() {
            assert_eq!(matrix.cell(a, b), matrix.cell(b, a));
        }
    }
}
