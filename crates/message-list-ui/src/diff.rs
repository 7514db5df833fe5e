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

//! Changes between two snapshots.
//!
//! Sections are matched by [`SectionKey`](crate::SectionKey), items by
//! [`ItemKey`](crate::ItemKey). Anything present on both sides is kept in
//! place if it belongs to the longest run that kept its relative order, and
//! reported as a move otherwise. This is `O(n log n)` in the number of
//! sections plus items.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, instrument};

use crate::{
    item::ItemKey,
    snapshot::{IndexPath, Snapshot},
};

/// An element that changed position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move<T> {
    /// Position in the old snapshot.
    pub from: T,
    /// Position in the new snapshot.
    pub to: T,
}

/// The operations turning one snapshot into another.
///
/// Deletions and moves' `from` refer to the old snapshot, insertions and
/// moves' `to` to the new one. Items of an inserted section are listed in
/// `item_inserts`, and items of a deleted section in `item_deletes`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changeset {
    pub section_deletes: Vec<usize>,
    pub section_inserts: Vec<usize>,
    pub section_moves: Vec<Move<usize>>,
    pub item_deletes: Vec<IndexPath>,
    pub item_inserts: Vec<IndexPath>,
    pub item_moves: Vec<Move<IndexPath>>,
}

impl Changeset {
    /// Compute the changes from `old` to `new`.
    #[instrument(skip_all, fields(old_sections = old.len(), new_sections = new.len()))]
    pub fn between(old: &Snapshot, new: &Snapshot) -> Self {
        let mut changeset = Self::default();

        for (index, entry) in old.sections().iter().enumerate() {
            if new.section_position(&entry.section().key()).is_none() {
                changeset.section_deletes.push(index);
            }
        }

        let mut kept_sections = Vec::new();
        for (index, entry) in new.sections().iter().enumerate() {
            match old.section_position(&entry.section().key()) {
                Some(old_index) => kept_sections.push(Move { from: old_index, to: index }),
                None => changeset.section_inserts.push(index),
            }
        }
        changeset.section_moves = unordered(kept_sections, |m| m.from);

        // Keys are expected to be unique, but occurrences of a repeated key
        // are paired up in order so they don't show up as changes.
        let mut old_positions: HashMap<ItemKey, VecDeque<IndexPath>> = HashMap::new();
        for (position, item) in old.items() {
            old_positions.entry(item.key()).or_default().push_back(position);
        }

        for (section_index, entry) in new.sections().iter().enumerate() {
            let old_section_index = old.section_position(&entry.section().key());
            let mut kept_items = Vec::new();

            for (item_index, item) in entry.items().iter().enumerate() {
                let to = IndexPath::new(section_index, item_index);
                match old_positions.get_mut(&item.key()).and_then(VecDeque::pop_front) {
                    None => changeset.item_inserts.push(to),
                    Some(from) if Some(from.section) == old_section_index => {
                        kept_items.push(Move { from, to });
                    }
                    // The item changed section.
                    Some(from) => changeset.item_moves.push(Move { from, to }),
                }
            }

            changeset.item_moves.extend(unordered(kept_items, |m| m.from.item));
        }
        changeset.item_moves.sort_by_key(|m| m.to);

        changeset.item_deletes = old_positions.into_values().flatten().collect();
        changeset.item_deletes.sort_unstable();

        debug!(
            section_deletes = changeset.section_deletes.len(),
            section_inserts = changeset.section_inserts.len(),
            section_moves = changeset.section_moves.len(),
            item_deletes = changeset.item_deletes.len(),
            item_inserts = changeset.item_inserts.len(),
            item_moves = changeset.item_moves.len(),
            "Computed changeset"
        );

        changeset
    }

    /// Whether both snapshots have the same sections and items in the same
    /// order.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The total number of operations.
    pub fn len(&self) -> usize {
        self.section_deletes.len()
            + self.section_inserts.len()
            + self.section_moves.len()
            + self.item_deletes.len()
            + self.item_inserts.len()
            + self.item_moves.len()
    }
}

/// Keep the moves whose source falls outside of the longest increasing run
/// of sources.
///
/// `kept` is in destination order; the elements of the longest subsequence
/// whose sources are increasing didn't move relative to each other.
fn unordered<T: Copy>(kept: Vec<Move<T>>, source: impl Fn(&Move<T>) -> usize) -> Vec<Move<T>> {
    let sources: Vec<usize> = kept.iter().map(&source).collect();
    let in_order = longest_increasing_subsequence(&sources);

    kept.into_iter().zip(in_order).filter_map(|(m, in_order)| (!in_order).then_some(m)).collect()
}

/// Mark the elements of one longest strictly increasing subsequence of
/// `values`.
fn longest_increasing_subsequence(values: &[usize]) -> Vec<bool> {
    // `tails[k]` is the index of the smallest value ending an increasing
    // subsequence of length `k + 1`.
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessors: Vec<Option<usize>> = vec![None; values.len()];

    for (index, value) in values.iter().enumerate() {
        let length = tails.partition_point(|&tail| values[tail] < *value);
        if length > 0 {
            predecessors[index] = Some(tails[length - 1]);
        }
        if length == tails.len() {
            tails.push(index);
        } else {
            tails[length] = index;
        }
    }

    let mut in_subsequence = vec![false; values.len()];
    let mut current = tails.last().copied();
    while let Some(index) = current {
        in_subsequence[index] = true;
        current = predecessors[index];
    }

    in_subsequence
}
