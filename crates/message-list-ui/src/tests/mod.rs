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

//! Scenario tests across the diff, dispatch and layout modules.

use chrono::{TimeZone, Utc};
use serde_json::Value as JsonValue;

use crate::{EdgeInsets, Item, Message, MessageListSettings, Section, Viewport};

mod diff;

/// Parse a message produced by `message_list_test::MessageFactory`.
fn item(json: JsonValue) -> Item {
    Item::new(Message::from_json(json).expect("the factory produces valid messages"))
}

/// The section of the given day of January 2024.
fn day(day: u32) -> Section {
    Section::new(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap())
}

/// A 400 points wide viewport, with 10 points of inset on each side.
fn viewport() -> Viewport {
    Viewport::new(400.0, EdgeInsets::new(0.0, 10.0, 0.0, 10.0))
}

fn settings() -> MessageListSettings {
    MessageListSettings::default()
}
