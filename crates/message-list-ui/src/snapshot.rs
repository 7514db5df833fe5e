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

//! Point-in-time views of the whole message list.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
    sync::Arc,
};

use chrono::{DateTime, Utc};
use imbl::Vector;
use indexmap::IndexMap;
use tracing::warn;

use crate::{
    Error, Result,
    item::{Item, ItemKey},
    message::Message,
    section::{Section, SectionKey},
    settings::SectionGrouping,
    typing::typing_indicator_section,
};

/// The position of an item: its section index and its index in that section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

/// A section along with its items, in display order.
#[derive(Clone, Debug)]
pub struct SnapshotSection {
    section: Section,
    items: Vector<Item>,
}

impl SnapshotSection {
    pub fn new(section: Section, items: impl IntoIterator<Item = Item>) -> Self {
        Self { section, items: items.into_iter().collect() }
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn items(&self) -> &Vector<Item> {
        &self.items
    }

    pub fn is_typing_indicator(&self) -> bool {
        self.section.is_typing_indicator()
    }

    /// Whether both sections would look the same: same section, same items
    /// in the same order.
    pub fn same_contents(&self, other: &Self) -> bool {
        self.section == other.section
            && self.items.len() == other.items.len()
            && self.items.iter().zip(other.items.iter()).all(|(a, b)| a.key() == b.key())
    }
}

/// The full list at one point in time.
///
/// A snapshot is validated when it is built: section keys must be unique.
/// Item keys are expected to be unique across all sections but this is not
/// enforced; when a key appears twice, [`Snapshot::item_position`] returns
/// its first occurrence and the diff treats later ones as the same item.
/// Both kinds of keys are indexed so positions can be looked up without
/// scanning.
#[derive(Clone, Default)]
pub struct Snapshot {
    sections: Vector<Arc<SnapshotSection>>,
    section_positions: HashMap<SectionKey, usize>,
    item_positions: HashMap<ItemKey, IndexPath>,
}

impl Snapshot {
    /// Build a snapshot from `(section, items)` pairs, in display order.
    pub fn new<I>(sections: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Section, Vec<Item>)>,
    {
        Self::from_sections(
            sections
                .into_iter()
                .map(|(section, items)| Arc::new(SnapshotSection::new(section, items))),
        )
    }

    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    pub(crate) fn from_sections<I>(sections: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<SnapshotSection>>,
    {
        let sections: Vector<_> = sections.into_iter().collect();
        let mut section_positions = HashMap::with_capacity(sections.len());
        let mut item_positions = HashMap::new();

        for (section_index, entry) in sections.iter().enumerate() {
            if section_positions.insert(entry.section.key(), section_index).is_some() {
                warn!(
                    identifier = entry.section.identifier(),
                    "Rejecting snapshot, section appears twice"
                );
                return Err(Error::DuplicateSection(entry.section.key()));
            }

            for (item_index, item) in entry.items.iter().enumerate() {
                let position = IndexPath::new(section_index, item_index);
                match item_positions.entry(item.key()) {
                    Entry::Vacant(vacant) => {
                        vacant.insert(position);
                    }
                    Entry::Occupied(occupied) => {
                        // Same message ID and payload, or a hash collision.
                        // Lookups by key resolve to the first occurrence.
                        warn!(
                            key = ?item.key(),
                            first = %occupied.get(),
                            second = %position,
                            "Item key appears twice in the snapshot"
                        );
                    }
                }
            }
        }

        Ok(Self { sections, section_positions, item_positions })
    }

    /// Bucket messages into sections, keeping their order.
    ///
    /// Each message lands in the section of its bucket; sections appear in
    /// the order their first message does.
    pub fn group_messages<I>(messages: I, grouping: SectionGrouping) -> Result<Self>
    where
        I: IntoIterator<Item = Message>,
    {
        let mut buckets: IndexMap<DateTime<Utc>, Vec<Item>> = IndexMap::new();
        for message in messages {
            let bucket = grouping.bucket(message.sent_date());
            buckets.entry(bucket).or_default().push(Item::new(message));
        }

        Self::new(buckets.into_iter().map(|(date, items)| (Section::new(date), items)))
    }

    pub fn sections(&self) -> &Vector<Arc<SnapshotSection>> {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&SnapshotSection> {
        self.sections.get(index).map(|section| &**section)
    }

    pub fn item(&self, position: IndexPath) -> Option<&Item> {
        self.section(position.section)?.items.get(position.item)
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|section| section.items.len()).sum()
    }

    pub fn section_position(&self, key: &SectionKey) -> Option<usize> {
        self.section_positions.get(key).copied()
    }

    pub fn item_position(&self, key: ItemKey) -> Option<IndexPath> {
        self.item_positions.get(&key).copied()
    }

    /// Whether the section at `index` is the typing indicator section.
    pub fn is_section_reserved_for_typing(&self, index: usize) -> bool {
        self.section(index).is_some_and(SnapshotSection::is_typing_indicator)
    }

    /// Whether the typing indicator is part of this snapshot.
    pub fn has_typing_indicator(&self) -> bool {
        self.sections.iter().any(|section| section.is_typing_indicator())
    }

    /// Every item with its position, in display order.
    pub fn items(&self) -> impl Iterator<Item = (IndexPath, &Item)> {
        self.sections.iter().enumerate().flat_map(|(section_index, section)| {
            section
                .items
                .iter()
                .enumerate()
                .map(move |(item_index, item)| (IndexPath::new(section_index, item_index), item))
        })
    }

    /// A copy of this snapshot with the typing indicator shown at the end, or
    /// removed.
    pub fn with_typing_indicator(&self, visible: bool) -> Result<Self> {
        let mut sections: Vector<_> = self
            .sections
            .iter()
            .filter(|section| !section.is_typing_indicator())
            .cloned()
            .collect();

        if visible {
            let (section, items) = typing_indicator_section();
            sections.push_back(Arc::new(SnapshotSection::new(section, items)));
        }

        Self::from_sections(sections)
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("sections", &self.sections.len())
            .field("items", &self.item_count())
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Snapshot`].
#[must_use]
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    sections: Vec<Arc<SnapshotSection>>,
}

impl SnapshotBuilder {
    /// Append a section with its items.
    pub fn section(mut self, section: Section, items: impl IntoIterator<Item = Item>) -> Self {
        self.sections.push(Arc::new(SnapshotSection::new(section, items)));
        self
    }

    /// Append the typing indicator section.
    pub fn typing_indicator(mut self) -> Self {
        let (section, items) = typing_indicator_section();
        self.sections.push(Arc::new(SnapshotSection::new(section, items)));
        self
    }

    pub fn build(self) -> Result<Snapshot> {
        Snapshot::from_sections(self.sections)
    }
}
