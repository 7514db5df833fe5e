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

//! Helpers to write tests for `message-list-ui`.
//!
//! Messages are produced in their JSON form so this crate doesn't depend on
//! the one it tests; parse them with `Message::from_json`.

use std::sync::atomic::{AtomicU64, Ordering::SeqCst};

use chrono::{DateTime, SecondsFormat};
use serde_json::{Value as JsonValue, json};

/// Create a message JSON object from arbitrary JSON.
///
/// Forwards all arguments to [`serde_json::json`].
#[macro_export]
macro_rules! message_json {
    ($( $tt:tt )*) => {
        ::serde_json::json!( $($tt)* )
    }
}

/// A sender used throughout the tests.
#[derive(Clone, Copy, Debug)]
pub struct TestUser {
    pub id: &'static str,
    pub display_name: &'static str,
}

pub static ALICE: TestUser = TestUser { id: "@alice:server.name", display_name: "Alice" };
pub static BOB: TestUser = TestUser { id: "@bob:other.server", display_name: "Bob" };
pub static CAROL: TestUser = TestUser { id: "@carol:other.server", display_name: "Carol" };

/// One day, in milliseconds.
pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Hands out messages with increasing IDs and timestamps.
///
/// Timestamps start at the Unix epoch and advance by one millisecond per
/// message, unless moved with [`MessageFactory::set_next_ts`].
#[derive(Debug, Default)]
pub struct MessageFactory {
    next_id: AtomicU64,
    next_ts: AtomicU64,
}

impl MessageFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp, in milliseconds since the Unix epoch, of the next
    /// message.
    pub fn set_next_ts(&self, value: u64) {
        self.next_ts.store(value, SeqCst);
    }

    /// A message whose content has the given serialized type and payload.
    pub fn kind(&self, name: &str, content: JsonValue) -> MessageBuilder {
        let id = self.next_id.fetch_add(1, SeqCst);
        let ts = self.next_ts.fetch_add(1, SeqCst);

        MessageBuilder {
            sender: ALICE,
            id: format!("msg-{id}"),
            ts,
            kind: json!({ "type": name, "content": content }),
        }
    }

    pub fn text(&self, body: &str) -> MessageBuilder {
        self.kind("text", json!(body))
    }

    pub fn emoji(&self, body: &str) -> MessageBuilder {
        self.kind("emoji", json!(body))
    }

    pub fn attributed_text(&self, text: &str) -> MessageBuilder {
        self.kind("attributed_text", json!({ "text": text, "runs": [] }))
    }

    pub fn photo(&self, url: Option<&str>, placeholder: &str) -> MessageBuilder {
        self.kind("photo", json!({ "url": url, "placeholder_image": placeholder }))
    }

    pub fn video(&self, url: Option<&str>, placeholder: &str) -> MessageBuilder {
        self.kind("video", json!({ "url": url, "placeholder_image": placeholder }))
    }

    pub fn location(&self, latitude: f64, longitude: f64) -> MessageBuilder {
        self.kind("location", json!({ "latitude": latitude, "longitude": longitude }))
    }

    pub fn audio(&self, url: &str) -> MessageBuilder {
        self.kind("audio", json!({ "url": url, "duration": 3.5 }))
    }

    pub fn contact(&self, display_name: &str) -> MessageBuilder {
        self.kind("contact", json!({ "display_name": display_name }))
    }

    pub fn link_preview(&self, url: &str) -> MessageBuilder {
        self.kind("link_preview", json!({ "text": url, "url": url }))
    }

    pub fn custom(&self, payload: Option<JsonValue>) -> MessageBuilder {
        self.kind("custom", payload.unwrap_or(JsonValue::Null))
    }
}

/// A message under construction.
#[derive(Debug)]
pub struct MessageBuilder {
    sender: TestUser,
    id: String,
    ts: u64,
    kind: JsonValue,
}

impl MessageBuilder {
    pub fn sender(mut self, sender: &TestUser) -> Self {
        self.sender = *sender;
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = id.to_owned();
        self
    }

    /// Override the timestamp, in milliseconds since the Unix epoch.
    pub fn server_ts(mut self, ts: u64) -> Self {
        self.ts = ts;
        self
    }

    pub fn into_json(self) -> JsonValue {
        let sent_date = DateTime::from_timestamp_millis(self.ts as i64)
            .expect("test timestamps are in range")
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        json!({
            "sender": { "id": self.sender.id, "display_name": self.sender.display_name },
            "message_id": self.id,
            "sent_date": sent_date,
            "kind": self.kind,
        })
    }
}
