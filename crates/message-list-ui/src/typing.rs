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

//! The "someone is typing" pseudo-message.
//!
//! The typing indicator is spliced into the list as a section of its own,
//! holding a single synthetic item. The section is recognized by its
//! identifier only, which can't be produced by [`Section::new`].

use chrono::{DateTime, Utc};

use crate::{
    item::Item,
    message::{Message, MessageKind, Sender},
    section::Section,
};

/// Identifier of the typing indicator section.
pub const TYPING_INDICATOR_SECTION_IDENTIFIER: &str = "typing_indicator";

/// The date of the typing indicator section, 2009-08-05 at midnight UTC.
pub fn typing_indicator_section_date() -> DateTime<Utc> {
    DateTime::from_timestamp(1_249_430_400, 0).unwrap_or_default()
}

/// The message shown in the typing indicator section.
///
/// It has no sender and no ID, is sent "now", and carries no payload.
pub fn typing_indicator_message() -> Message {
    Message::new(Sender::default(), "", Utc::now(), MessageKind::Custom(None))
}

/// Build the typing indicator section with its single item.
///
/// A fresh value is returned on each call. Only the sent date of the message
/// differs between calls; the section and the item key are always the same.
pub fn typing_indicator_section() -> (Section, Vec<Item>) {
    let section = Section::with_identifier(
        typing_indicator_section_date(),
        TYPING_INDICATOR_SECTION_IDENTIFIER,
    );
    (section, vec![Item::new(typing_indicator_message())])
}
