// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Conflict detection tests
//!
//! Tests for shared sources and duplicate bindings.

use crate::core::{
    codec::decode,
    conflict::ConflictDetector,
    defaults::default_table,
    table::BindingTable,
    types::{BindingDesc, ButtonCode, RgssVersion},
};

/// Helper to create test tables
fn table(entries: &[(ButtonCode, &str)]) -> BindingTable {
    entries
        .iter()
        .map(|(action, token)| BindingDesc::new(*action, decode(token)))
        .collect()
}

#[test]
fn test_no_conflicts_when_empty() {
    let detector = ConflictDetector::new();
    assert!(detector.find_shared_sources().is_empty());
    assert!(detector.find_duplicates().is_empty());
    assert_eq!(detector.total_bindings(), 0);
}

#[test]
fn test_detects_shared_source() {
    let detector = ConflictDetector::from_table(&table(&[
        (ButtonCode::A, "Left Shift"),
        (ButtonCode::Shift, "Left Shift"),
        (ButtonCode::C, "Return"),
    ]));

    let shared = detector.find_shared_sources();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].source, decode("Left Shift"));
    assert_eq!(shared[0].actions, vec![ButtonCode::A, ButtonCode::Shift]);
    assert!(detector.is_shared(&decode("Left Shift")));
    assert!(!detector.is_shared(&decode("Return")));
}

#[test]
fn test_duplicate_is_not_shared() {
    let detector = ConflictDetector::from_table(&table(&[
        (ButtonCode::C, "Return"),
        (ButtonCode::C, "Return"),
        (ButtonCode::C, "Return"),
    ]));

    assert!(detector.find_shared_sources().is_empty());

    let duplicates = detector.find_duplicates();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].action, ButtonCode::C);
    assert_eq!(duplicates[0].count, 3);
}

#[test]
fn test_default_layout_has_no_duplicates() {
    for version in [RgssVersion::Rgss1, RgssVersion::Rgss2, RgssVersion::Rgss3] {
        let detector = ConflictDetector::from_table(&default_table(version));
        assert!(detector.find_duplicates().is_empty());
        assert_eq!(detector.total_bindings(), default_table(version).len());
    }
}

#[test]
fn test_shift_is_shared_from_rgss2() {
    let rgss1 = ConflictDetector::from_table(&default_table(RgssVersion::Rgss1));
    let rgss3 = ConflictDetector::from_table(&default_table(RgssVersion::Rgss3));

    assert!(!rgss1.is_shared(&decode("Left Shift")));
    assert!(rgss3.is_shared(&decode("Left Shift")));
}

#[test]
fn test_shared_sources_order_is_stable() {
    let table = default_table(RgssVersion::Rgss3);
    let shared = ConflictDetector::from_table(&table).find_shared_sources();

    let position = |token: &str| shared.iter().position(|s| s.source == decode(token)).unwrap();
    assert!(position("Left Shift") < position("Right Shift"));

    // Each detector hashes with its own seed
    for _ in 0..8 {
        assert_eq!(ConflictDetector::from_table(&table).find_shared_sources(), shared);
    }
}

#[test]
fn test_duplicates_order_is_stable() {
    let table = table(&[
        (ButtonCode::C, "Space"),
        (ButtonCode::C, "Return"),
        (ButtonCode::C, "Space"),
        (ButtonCode::C, "Return"),
    ]);

    let duplicates = ConflictDetector::from_table(&table).find_duplicates();
    let sources: Vec<_> = duplicates.iter().map(|d| d.source).collect();
    assert_eq!(sources, vec![decode("Return"), decode("Space")]);
}
