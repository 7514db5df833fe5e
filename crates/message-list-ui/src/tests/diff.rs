// Copyright 2025 The Matrix.org Foundation C.I.C.
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

use message_list_test::MessageFactory;
use serde_json::json;
use similar_asserts::assert_eq;

use super::{day, item};
use crate::{Changeset, IndexPath, Move, Snapshot};

#[test]
fn test_identical_snapshots() {
    let f = MessageFactory::new();
    let a = item(f.text("a").into_json());
    let b = item(f.text("b").into_json());

    let snapshot = Snapshot::builder().section(day(1), [a, b]).build().unwrap();
    let changeset = Changeset::between(&snapshot, &snapshot.clone());

    assert!(changeset.is_empty());
    assert_eq!(changeset, Changeset::default());
}

#[test]
fn test_ignored_payload_change_is_not_a_change() {
    let f = MessageFactory::new();
    let before = item(f.custom(Some(json!({ "votes": 1 }))).id("poll").into_json());
    let after = item(f.custom(Some(json!({ "votes": 2 }))).id("poll").into_json());

    let old = Snapshot::builder().section(day(1), [before]).build().unwrap();
    let new = Snapshot::builder().section(day(1), [after]).build().unwrap();

    let changeset = Changeset::between(&old, &new);
    assert!(changeset.is_empty(), "{changeset:?}");
}

#[test]
fn test_edited_text_is_delete_and_insert() {
    let f = MessageFactory::new();
    let before = item(f.text("helo").id("m1").into_json());
    let after = item(f.text("hello").id("m1").into_json());

    let old = Snapshot::builder().section(day(1), [before]).build().unwrap();
    let new = Snapshot::builder().section(day(1), [after]).build().unwrap();

    let changeset = Changeset::between(&old, &new);
    assert_eq!(changeset.item_deletes, [IndexPath::new(0, 0)]);
    assert_eq!(changeset.item_inserts, [IndexPath::new(0, 0)]);
    assert_eq!(changeset.len(), 2);
}

#[test]
fn test_typing_indicator_insertion() {
    let f = MessageFactory::new();
    let a = item(f.text("A").into_json());

    let old = Snapshot::builder().section(day(1), [a.clone()]).build().unwrap();
    let new = Snapshot::builder().section(day(1), [a]).typing_indicator().build().unwrap();

    let changeset = Changeset::between(&old, &new);
    assert_eq!(
        changeset,
        Changeset {
            section_inserts: vec![1],
            item_inserts: vec![IndexPath::new(1, 0)],
            ..Default::default()
        }
    );

    // And back.
    let changeset = Changeset::between(&new, &old);
    assert_eq!(
        changeset,
        Changeset {
            section_deletes: vec![1],
            item_deletes: vec![IndexPath::new(1, 0)],
            ..Default::default()
        }
    );
}

#[test]
fn test_typing_indicator_coexists_with_real_section_on_its_date() {
    let f = MessageFactory::new();
    let a = item(f.text("A").into_json());

    let (typing, _) = crate::typing_indicator_section();
    let real = crate::Section::new(typing.date());

    let snapshot = Snapshot::builder().section(real, [a]).typing_indicator().build().unwrap();
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.is_section_reserved_for_typing(1));
}

#[test]
fn test_new_day() {
    let f = MessageFactory::new();
    let a = item(f.text("A").into_json());
    let b = item(f.text("B").into_json());
    let c = item(f.text("C").into_json());

    let old = Snapshot::builder().section(day(1), [a.clone(), b.clone()]).build().unwrap();
    let new = Snapshot::builder().section(day(1), [a, b]).section(day(2), [c]).build().unwrap();

    let changeset = Changeset::between(&old, &new);
    assert_eq!(changeset.section_inserts, [1]);
    assert_eq!(changeset.item_inserts, [IndexPath::new(1, 0)]);
    assert_eq!(changeset.len(), 2);
}

#[test]
fn test_item_moved_within_section() {
    let f = MessageFactory::new();
    let a = item(f.text("A").into_json());
    let b = item(f.text("B").into_json());
    let c = item(f.text("C").into_json());
    let d = item(f.text("D").into_json());

    let old = Snapshot::builder()
        .section(day(1), [a.clone(), b.clone(), c.clone(), d.clone()])
        .build()
        .unwrap();
    let new = Snapshot::builder().section(day(1), [d, a, b, c]).build().unwrap();

    let changeset = Changeset::between(&old, &new);
    assert_eq!(
        changeset.item_moves,
        [Move { from: IndexPath::new(0, 3), to: IndexPath::new(0, 0) }]
    );
    assert_eq!(changeset.len(), 1);
}

#[test]
fn test_item_moved_across_sections() {
    let f = MessageFactory::new();
    let a = item(f.text("A").into_json());
    let b = item(f.text("B").into_json());
    let c = item(f.text("C").into_json());

    let old = Snapshot::builder()
        .section(day(1), [a.clone(), b.clone()])
        .section(day(2), [c.clone()])
        .build()
        .unwrap();
    let new = Snapshot::builder().section(day(1), [a]).section(day(2), [b, c]).build().unwrap();

    let changeset = Changeset::between(&old, &new);
    assert_eq!(
        changeset.item_moves,
        [Move { from: IndexPath::new(0, 1), to: IndexPath::new(1, 0) }]
    );
    assert_eq!(changeset.len(), 1);
}

#[test]
fn test_removed_section_and_items() {
    let f = MessageFactory::new();
    let a = item(f.text("A").into_json());
    let b = item(f.text("B").into_json());
    let c = item(f.text("C").into_json());

    let old = Snapshot::builder()
        .section(day(1), [a])
        .section(day(2), [b.clone(), c.clone()])
        .build()
        .unwrap();
    let new = Snapshot::builder().section(day(2), [b, c]).build().unwrap();

    let changeset = Changeset::between(&old, &new);
    assert_eq!(changeset.section_deletes, [0]);
    assert_eq!(changeset.item_deletes, [IndexPath::new(0, 0)]);
    assert!(changeset.section_moves.is_empty());
    assert!(changeset.item_moves.is_empty());
}

#[test]
fn test_from_empty() {
    let f = MessageFactory::new();
    let a = item(f.text("A").into_json());
    let b = item(f.text("B").into_json());

    let new = Snapshot::builder().section(day(1), [a]).section(day(2), [b]).build().unwrap();
    let changeset = Changeset::between(&Snapshot::default(), &new);

    assert_eq!(changeset.section_inserts, [0, 1]);
    assert_eq!(changeset.item_inserts, [IndexPath::new(0, 0), IndexPath::new(1, 0)]);
    assert_eq!(changeset.len(), 4);
}

#[test]
fn test_repeated_key_is_not_a_change() {
    let f = MessageFactory::new();
    let first = item(f.custom(Some(json!({ "v": 1 }))).id("x").into_json());
    let second = item(f.custom(Some(json!({ "v": 2 }))).id("x").into_json());
    let a = item(f.text("A").into_json());
    let b = item(f.text("B").into_json());

    let old = Snapshot::builder()
        .section(day(1), [first.clone()])
        .section(day(2), [second.clone(), a.clone()])
        .build()
        .unwrap();
    assert!(Changeset::between(&old, &old.clone()).is_empty());

    // Only the new item is reported, the rest of the snapshot is untouched.
    let new = Snapshot::builder()
        .section(day(1), [first])
        .section(day(2), [second, a, b])
        .build()
        .unwrap();
    let changeset = Changeset::between(&old, &new);
    assert_eq!(
        changeset,
        Changeset { item_inserts: vec![IndexPath::new(1, 2)], ..Default::default() }
    );
}
