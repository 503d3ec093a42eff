// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Aggregate query tests.

use intel_platform_domain::{AggregateRow, MonthlyCategoryCount};

use super::{create_test_incident, test_store};
use crate::{PersistenceError, Store};

fn seeded_store() -> Store {
    let mut store: Store = test_store();
    for (severity, category, status) in [
        ("High", "DDos", "Open"),
        ("High", "DDos", "Closed"),
        ("Low", "Phishing", "Open"),
    ] {
        store
            .incidents()
            .insert(&create_test_incident("2024-03-01", severity, category, status))
            .unwrap();
    }
    store
}

fn row(label: &str, count: usize) -> AggregateRow {
    AggregateRow::new(label, count)
}

#[test]
fn test_count_by_category() {
    let mut store: Store = seeded_store();
    assert_eq!(
        store.incidents().count_by_category().unwrap(),
        vec![row("DDos", 2), row("Phishing", 1)]
    );
}

#[test]
fn test_count_high_severity_by_status_breaks_ties_by_label() {
    let mut store: Store = seeded_store();
    assert_eq!(
        store.incidents().count_high_severity_by_status().unwrap(),
        vec![row("Closed", 1), row("Open", 1)]
    );
}

#[test]
fn test_categories_above_threshold_is_strict() {
    let mut store: Store = seeded_store();

    assert_eq!(
        store.incidents().categories_above_threshold(1).unwrap(),
        vec![row("DDos", 2)]
    );
    assert!(
        store
            .incidents()
            .categories_above_threshold(2)
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        store.incidents().categories_above_threshold(0).unwrap(),
        vec![row("DDos", 2), row("Phishing", 1)]
    );
}

#[test]
fn test_negative_threshold_rejected() {
    let mut store: Store = seeded_store();
    assert!(matches!(
        store.incidents().categories_above_threshold(-1),
        Err(PersistenceError::InvalidInput { ref field, .. }) if field == "min_count"
    ));
}

#[test]
fn test_ties_are_ordered_lexically_regardless_of_insert_order() {
    let mut store: Store = test_store();
    for category in ["Malware", "Breach", "Phishing"] {
        store
            .incidents()
            .insert(&create_test_incident("2024-03-01", "Low", category, "Open"))
            .unwrap();
    }

    let labels: Vec<String> = store
        .incidents()
        .count_by_category()
        .unwrap()
        .into_iter()
        .map(|r| r.label)
        .collect();
    assert_eq!(labels, ["Breach", "Malware", "Phishing"]);
}

#[test]
fn test_empty_store_aggregates_are_empty() {
    let mut store: Store = test_store();
    assert!(store.incidents().count_by_category().unwrap().is_empty());
    assert!(
        store
            .incidents()
            .count_high_severity_by_status()
            .unwrap()
            .is_empty()
    );
    assert!(
        store
            .incidents()
            .count_by_month_and_category()
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_count_by_month_and_category() {
    let mut store: Store = test_store();
    for (timestamp, category) in [
        ("2024-02-10", "Phishing"),
        ("2024-01-05 08:00:00", "DDos"),
        ("2024-01-20", "DDos"),
        ("2024-01-21", "Breach"),
    ] {
        store
            .incidents()
            .insert(&create_test_incident(timestamp, "Low", category, "Open"))
            .unwrap();
    }

    let monthly: Vec<MonthlyCategoryCount> =
        store.incidents().count_by_month_and_category().unwrap();

    let flattened: Vec<(&str, &str, usize)> = monthly
        .iter()
        .map(|m| (m.month.as_str(), m.category.as_str(), m.count))
        .collect();
    assert_eq!(
        flattened,
        vec![
            ("2024-01", "Breach", 1),
            ("2024-01", "DDos", 2),
            ("2024-02", "Phishing", 1),
        ]
    );
}
