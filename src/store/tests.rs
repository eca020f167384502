// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::ResultStore;
use crate::model::fixtures::{area_highlight, scaled, text_highlight};
use crate::model::{EmbeddingId, HighlightPatch, ResultHighlight};

fn ranked(count: usize) -> Vec<ResultHighlight> {
    (0..count)
        .map(|idx| text_highlight(&format!("h{idx}"), 1.0 - idx as f64 / 100.0, 1 + idx as u32 % 3))
        .collect()
}

fn assert_invariant(store: &ResultStore) {
    assert!(store.rowcount() <= store.len(), "rowcount {} > len {}", store.rowcount(), store.len());
    assert_eq!(store.working_set().len(), store.rowcount());
}

#[fixture]
fn populated() -> ResultStore {
    let mut store = ResultStore::new();
    store.select_embedding(Some(EmbeddingId::new("doc").expect("embedding id")));
    store.replace_all(ranked(12));
    store.set_rowcount(10);
    store
}

#[test]
fn new_store_is_empty() {
    let store = ResultStore::new();
    assert!(store.is_empty());
    assert_eq!(store.rowcount(), 0);
    assert_eq!(store.embedding_id(), None);
    assert_invariant(&store);
}

#[rstest]
fn replace_all_preserves_order(mut populated: ResultStore) {
    let list = vec![
        text_highlight("z", 0.2, 1),
        text_highlight("a", 0.9, 2),
        area_highlight("m", 0.5, 1),
    ];
    populated.replace_all(list.clone());

    assert_eq!(populated.highlights(), list.as_slice());
    assert_invariant(&populated);
}

#[rstest]
fn replace_all_clamps_cutoff_to_shorter_list(mut populated: ResultStore) {
    assert_eq!(populated.rowcount(), 10);
    populated.replace_all(ranked(3));
    assert_eq!(populated.rowcount(), 3);
    assert_invariant(&populated);
}

#[rstest]
fn replace_all_keeps_cutoff_when_it_still_fits(mut populated: ResultStore) {
    populated.replace_all(ranked(20));
    assert_eq!(populated.rowcount(), 10);
    assert_invariant(&populated);
}

#[rstest]
fn reset_is_idempotent(mut populated: ResultStore) {
    populated.reset();
    assert!(populated.highlights().is_empty());
    assert_eq!(populated.rowcount(), 0);

    let after_first = populated.clone();
    populated.reset();
    assert_eq!(populated.highlights(), after_first.highlights());
    assert_eq!(populated.rowcount(), 0);
    assert_invariant(&populated);
}

#[rstest]
fn reset_keeps_selected_document(mut populated: ResultStore) {
    populated.reset();
    assert_eq!(populated.embedding_id().map(|id| id.as_str()), Some("doc"));
}

#[rstest]
fn patch_missing_id_is_a_silent_no_op(mut populated: ResultStore) {
    let before = populated.highlights().to_vec();
    let patched = populated.patch_by_id(
        "missing",
        HighlightPatch::area_resize(scaled(0.0, 0.0, 1.0, 1.0, 1), "img".to_owned()),
    );

    assert!(!patched);
    assert_eq!(populated.highlights(), before.as_slice());
}

#[rstest]
fn patch_touches_exactly_one_entity(mut populated: ResultStore) {
    let before = populated.highlights().to_vec();
    let patched = populated.patch_by_id(
        "h4",
        HighlightPatch::area_resize(scaled(10.0, 20.0, 30.0, 40.0, 2), "img".to_owned()),
    );
    assert!(patched);

    for (idx, (now, then)) in populated.highlights().iter().zip(before.iter()).enumerate() {
        if idx == 4 {
            assert_eq!(now.content.image.as_deref(), Some("img"));
            assert_eq!(now.position.bounding_rect.x1, 10.0);
            assert!(now.position.rects.is_empty());
        } else {
            assert_eq!(now, then);
        }
    }
}

#[rstest]
fn lookup_finds_by_id(populated: ResultStore) {
    assert_eq!(populated.lookup_by_id("h7").map(|h| h.id.as_str()), Some("h7"));
    assert!(populated.lookup_by_id("nope").is_none());
    assert_eq!(populated.position_of("h7"), Some(7));
}

#[rstest]
fn working_set_is_the_ranked_prefix(populated: ResultStore) {
    let ids = populated.working_set().iter().map(|h| h.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, (0..10).map(|idx| format!("h{idx}")).collect::<Vec<_>>());
    assert!(populated.is_in_working_set("h9"));
    assert!(!populated.is_in_working_set("h10"));
}

#[rstest]
#[case(0, 0)]
#[case(5, 5)]
#[case(12, 12)]
#[case(99, 12)]
fn set_rowcount_clamps(mut populated: ResultStore, #[case] requested: usize, #[case] applied: usize) {
    assert_eq!(populated.set_rowcount(requested), applied);
    assert_eq!(populated.rowcount(), applied);
    assert_invariant(&populated);
}

#[rstest]
fn selecting_a_document_resets_results(mut populated: ResultStore) {
    populated.select_embedding(Some(EmbeddingId::new("other").expect("embedding id")));
    assert!(populated.is_empty());
    assert_eq!(populated.rowcount(), 0);
    assert_eq!(populated.embedding_id().map(|id| id.as_str()), Some("other"));

    populated.replace_all(ranked(2));
    populated.select_embedding(None);
    assert!(populated.is_empty());
    assert_eq!(populated.embedding_id(), None);
}

#[rstest]
fn every_mutation_bumps_rev(mut populated: ResultStore) {
    let rev = populated.rev();
    populated.replace_all(ranked(4));
    assert!(populated.rev() > rev);

    let rev = populated.rev();
    populated.patch_by_id(
        "h1",
        HighlightPatch::area_resize(scaled(0.0, 0.0, 1.0, 1.0, 1), "img".to_owned()),
    );
    assert!(populated.rev() > rev);

    let rev = populated.rev();
    populated.patch_by_id(
        "missing",
        HighlightPatch::area_resize(scaled(0.0, 0.0, 1.0, 1.0, 1), "img".to_owned()),
    );
    assert_eq!(populated.rev(), rev);
}

#[rstest]
fn empty_patch_changes_nothing(mut populated: ResultStore) {
    let before = populated.highlights().to_vec();
    let rev = populated.rev();

    assert!(!populated.patch_by_id("h1", HighlightPatch::default()));
    assert_eq!(populated.highlights(), before.as_slice());
    assert_eq!(populated.rev(), rev);
}

#[test]
fn invariant_holds_across_a_mixed_sequence() {
    let mut store = ResultStore::new();
    let steps: Vec<Box<dyn Fn(&mut ResultStore)>> = vec![
        Box::new(|s| s.replace_all(ranked(5))),
        Box::new(|s| {
            s.set_rowcount(5);
        }),
        Box::new(|s| s.replace_all(ranked(2))),
        Box::new(|s| {
            s.patch_by_id("h0", HighlightPatch::default());
        }),
        Box::new(|s| {
            s.set_rowcount(usize::MAX);
        }),
        Box::new(|s| s.reset()),
        Box::new(|s| s.replace_all(Vec::new())),
        Box::new(|s| s.select_embedding(None)),
    ];

    for step in steps {
        step(&mut store);
        assert_invariant(&store);
    }
}
