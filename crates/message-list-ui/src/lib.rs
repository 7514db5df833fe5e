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

//! The core of a chat message list: which cell shows each message, what
//! changed between two states of the list, and how big things are.
//!
//! A host hands the crate a [`Snapshot`] of the list every time it changes:
//! an ordered list of [`Section`]s, each with its ordered [`Item`]s.
//! [`Changeset::between`] (or [`ObservableSnapshot`]) tells the host which
//! sections and items to insert, remove or move. For every item to display,
//! a [`CellResolver`] picks the cell, and a [`LayoutDelegate`] answers the
//! layout questions.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_debug_implementations)]

mod diff;
mod dispatch;
mod error;
mod geometry;
mod item;
mod layout;
mod message;
mod observable;
mod section;
mod settings;
mod snapshot;
mod typing;

pub use self::{
    diff::{Changeset, Move},
    dispatch::{
        BuiltInCell, CellOverrides, CellResolver, NoOverrides, RenderContext, RenderFamily,
        RenderedCell, Viewport,
    },
    error::{Error, Result},
    geometry::{EdgeInsets, LabelAlignment, Size, TextAlignment},
    item::{Item, ItemKey},
    layout::{
        CellSizeCalculator, DefaultLayout, LayoutDelegate, SizeCalculator, size_calculator_for,
    },
    message::{
        AttributeRun, AttributedText, AudioItem, ContactItem, ImageRef, LinkItem, LocationItem,
        MediaItem, Message, MessageKind, MessageKindTag, Sender, TextAttribute,
    },
    observable::ObservableSnapshot,
    section::{Section, SectionKey, default_identifier},
    settings::{
        DEFAULT_TYPING_INDICATOR_HEIGHT, DEFAULT_TYPING_INDICATOR_TOP_INSET, MessageListSettings,
        MissingRendererPolicy, SectionGrouping,
    },
    snapshot::{IndexPath, Snapshot, SnapshotBuilder, SnapshotSection},
    typing::{
        TYPING_INDICATOR_SECTION_IDENTIFIER, typing_indicator_message, typing_indicator_section,
        typing_indicator_section_date,
    },
};

#[cfg(test)]
mod tests;

#[cfg(test)]
#[ctor::ctor]
fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .init();
}
