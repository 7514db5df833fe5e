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

//! Messages as they are handed to the list by the message store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

mod content;

pub use self::content::{
    AttributeRun, AttributedText, AudioItem, ContactItem, ImageRef, LinkItem, LocationItem,
    MediaItem, MessageKind, MessageKindTag, TextAttribute,
};
use crate::{Error, Result};

/// The author of a message.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sender {
    pub id: String,
    pub display_name: String,
}

impl Sender {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { id: id.into(), display_name: display_name.into() }
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display names are personal data, keep them out of logs.
        f.debug_struct("Sender").field("id", &self.id).finish_non_exhaustive()
    }
}

/// A single chat message.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    message_id: String,
    sent_date: DateTime<Utc>,
    kind: MessageKind,
}

impl Message {
    pub fn new(
        sender: Sender,
        message_id: impl Into<String>,
        sent_date: DateTime<Utc>,
        kind: MessageKind,
    ) -> Self {
        Self { sender, message_id: message_id.into(), sent_date, kind }
    }

    /// Parse a message from its JSON form.
    ///
    /// The content type is checked before anything else, so a message of a
    /// kind this crate doesn't know about is rejected with
    /// [`Error::UnsupportedMessageKind`] rather than a generic parse error.
    pub fn from_json(value: JsonValue) -> Result<Self> {
        if let Some(name) = value.pointer("/kind/type").and_then(JsonValue::as_str) {
            if MessageKindTag::from_name(name).is_none() {
                return Err(Error::UnsupportedMessageKind(name.to_owned()));
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    /// The globally unique ID the sender assigned to this message.
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn sent_date(&self) -> DateTime<Utc> {
        self.sent_date
    }

    pub fn kind(&self) -> &MessageKind {
        &self.kind
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { sender, message_id, sent_date, kind } = self;
        f.debug_struct("Message")
            .field("sender", sender)
            .field("message_id", message_id)
            .field("sent_date", sent_date)
            .field("kind", kind)
            .finish()
    }
}
