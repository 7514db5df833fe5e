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

//! A conversation going on while the host keeps its list up to date.

use assert_matches2::assert_let;
use eyeball_im::VectorDiff;
use futures_util::pin_mut;
use message_list_test::{BOB, DAY_MS, MessageFactory, message_json};
use message_list_ui::{
    CellOverrides, CellResolver, DefaultLayout, EdgeInsets, Error, IndexPath, LayoutDelegate,
    Message, MessageListSettings, ObservableSnapshot, RenderContext, RenderFamily, RenderedCell,
    Size, Viewport,
};
use stream_assert::{assert_next_matches, assert_pending};

use crate::group;

/// Renders custom messages as the ID of the message.
struct PollCells;

impl CellOverrides<String> for PollCells {
    fn custom_cell(
        &self,
        message: &Message,
        _position: IndexPath,
        _context: &RenderContext<'_>,
    ) -> Option<String> {
        Some(message.message_id().to_owned())
    }
}

#[test]
fn test_conversation_over_two_days() {
    let f = MessageFactory::new();
    let hello = f.text("Hello").into_json();
    let hi = f.text("Hi!").sender(&BOB).into_json();

    let mut list = ObservableSnapshot::with_snapshot(group([hello.clone(), hi.clone()]));
    let (values, stream) = list.subscribe().into_values_and_stream();
    pin_mut!(stream);
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].items().len(), 2);

    // Bob starts typing.
    let changeset = list.set_typing_indicator(true).unwrap();
    assert_eq!(changeset.section_inserts, [1]);
    assert_eq!(changeset.item_inserts, [IndexPath::new(1, 0)]);
    let typing = assert_next_matches!(stream, VectorDiff::Insert { index: 1, value } => value);
    assert!(typing.is_typing_indicator());
    assert_pending!(stream);

    // The next day, the poll replaces the typing indicator.
    f.set_next_ts(DAY_MS);
    let poll = f.custom(Some(message_json!({ "question": "Lunch?" }))).id("poll").into_json();
    let changeset = list.update(group([hello, hi, poll]));

    assert_eq!(changeset.section_deletes, [1]);
    assert_eq!(changeset.item_deletes, [IndexPath::new(1, 0)]);
    assert_eq!(changeset.section_inserts, [1]);
    assert_eq!(changeset.item_inserts, [IndexPath::new(1, 0)]);
    assert!(changeset.section_moves.is_empty());
    assert!(changeset.item_moves.is_empty());

    assert_next_matches!(stream, VectorDiff::Remove { index: 1 });
    let section = assert_next_matches!(stream, VectorDiff::Insert { index: 1, value } => value);
    assert!(!section.is_typing_indicator());
    assert_pending!(stream);

    // Render the whole list.
    let settings = MessageListSettings::default();
    let viewport = Viewport::new(400.0, EdgeInsets::new(0.0, 10.0, 0.0, 10.0));
    let ctx = RenderContext::new(list.snapshot(), viewport, &settings);

    let resolver = CellResolver::new(PollCells);
    let cells: Vec<RenderedCell<'_, String>> = list
        .items()
        .map(|(position, _)| resolver.resolve_at(position, &ctx))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(cells.len(), 3);
    assert_let!(Some(first) = cells[0].as_built_in());
    assert_eq!(first.family, RenderFamily::Text);
    assert_eq!(first.message.sender().display_name, "Alice");
    assert_eq!(cells[2].as_custom().map(String::as_str), Some("poll"));

    // Without a renderer for custom messages, the same list can't be rendered.
    let result: Result<Vec<RenderedCell<'_, String>>, Error> = list
        .items()
        .map(|(position, _)| CellResolver::new(DefaultCells).resolve_at(position, &ctx))
        .collect();
    assert_let!(Err(Error::MissingCustomRenderer { position }) = result);
    assert_eq!(position, IndexPath::new(1, 0));

    assert_eq!(DefaultLayout.header_view_size(0, &ctx), Size::ZERO);
}

#[test]
fn test_edited_payload_is_not_republished() {
    let f = MessageFactory::new();
    let before = f.custom(Some(message_json!({ "votes": 1 }))).id("poll").into_json();
    let after = f.custom(Some(message_json!({ "votes": 2 }))).id("poll").into_json();

    let mut list = ObservableSnapshot::with_snapshot(group([before]));
    let (_, stream) = list.subscribe().into_values_and_stream();
    pin_mut!(stream);

    // Custom payloads don't take part in the identity of the item.
    assert!(list.update(group([after])).is_empty());
    assert_pending!(stream);
}

/// Never overrides anything.
struct DefaultCells;

impl CellOverrides<String> for DefaultCells {}
