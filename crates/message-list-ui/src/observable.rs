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

use std::{ops::Deref, sync::Arc};

use eyeball_im::{ObservableVector, VectorSubscriber};
use tracing::{instrument, trace};

use crate::{
    Result,
    diff::Changeset,
    snapshot::{Snapshot, SnapshotSection},
};

/// How many update batches a subscriber may lag behind before it is told to
/// reset.
const SUBSCRIBER_BUFFER_CAPACITY: usize = 32;

/// The current snapshot of a message list, observable section by section.
///
/// Every update is diffed against the previous snapshot and published to
/// subscribers as a single batch of [`VectorDiff`](eyeball_im::VectorDiff)s:
/// `Remove` for deleted or moved-away sections, `Insert` for new or
/// moved-in sections, and `Set` for sections that stayed in place but whose
/// items changed.
///
/// A section whose items all kept their keys is not republished, even if
/// some ignored payload changed; subscribers keep the value they have.
#[derive(Debug)]
pub struct ObservableSnapshot {
    sections: ObservableVector<Arc<SnapshotSection>>,
    snapshot: Snapshot,
}

impl ObservableSnapshot {
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::default())
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let mut sections = ObservableVector::with_capacity(SUBSCRIBER_BUFFER_CAPACITY);
        sections.append(snapshot.sections().clone());
        Self { sections, snapshot }
    }

    /// Subscribe to the sections.
    pub fn subscribe(&self) -> VectorSubscriber<Arc<SnapshotSection>> {
        self.sections.subscribe()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Replace the current snapshot, publish the differences and return
    /// them.
    #[instrument(skip_all, fields(sections = new.len()))]
    pub fn update(&mut self, new: Snapshot) -> Changeset {
        let changeset = Changeset::between(&self.snapshot, &new);
        if changeset.is_empty() {
            trace!("Nothing changed");
            self.snapshot = new;
            return changeset;
        }

        let mut removed: Vec<usize> = changeset
            .section_deletes
            .iter()
            .copied()
            .chain(changeset.section_moves.iter().map(|m| m.from))
            .collect();
        removed.sort_unstable();

        let mut inserted: Vec<usize> = changeset
            .section_inserts
            .iter()
            .copied()
            .chain(changeset.section_moves.iter().map(|m| m.to))
            .collect();
        inserted.sort_unstable();

        let mut transaction = self.sections.transaction();

        // Once removals are done, the remaining sections are in their final
        // relative order, so inserting by increasing index lands every
        // section at its final position.
        for index in removed.into_iter().rev() {
            transaction.remove(index);
        }
        for &index in &inserted {
            transaction.insert(index, new.sections()[index].clone());
        }

        for (index, entry) in new.sections().iter().enumerate() {
            if inserted.binary_search(&index).is_ok() {
                continue;
            }
            if !transaction[index].same_contents(entry) {
                transaction.set(index, entry.clone());
            }
        }

        transaction.commit();
        self.snapshot = new;

        changeset
    }

    /// Show or hide the typing indicator at the end of the list.
    pub fn set_typing_indicator(&mut self, visible: bool) -> Result<Changeset> {
        if self.snapshot.has_typing_indicator() == visible {
            return Ok(Changeset::default());
        }

        let new = self.snapshot.with_typing_indicator(visible)?;
        Ok(self.update(new))
    }
}

impl Default for ObservableSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

// It's fine to deref to an immutable reference to `Snapshot`.
impl Deref for ObservableSnapshot {
    type Target = Snapshot;

    fn deref(&self) -> &Self::Target {
        &self.snapshot
    }
}
