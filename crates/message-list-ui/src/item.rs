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

use std::{
    fmt,
    hash::{DefaultHasher, Hash, Hasher},
};

use crate::message::Message;

/// A message, as an element of the list.
///
/// Two items are equal when their [`ItemKey`]s are, which is not the same as
/// their messages being equal: only the message ID and the part of the
/// payload that shows in the cell take part in the key. In particular two
/// custom messages with the same ID are always equal, and a hash collision
/// makes two unrelated items equal.
#[derive(Clone)]
pub struct Item {
    message: Message,
    key: ItemKey,
}

impl Item {
    pub fn new(message: Message) -> Self {
        let key = ItemKey::of(&message);
        Self { message, key }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn into_message(self) -> Message {
        self.message
    }

    /// The key identifying this item across snapshots.
    pub fn key(&self) -> ItemKey {
        self.key
    }
}

impl From<Message> for Item {
    fn from(message: Message) -> Self {
        Self::new(message)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item").field("key", &self.key).field("message", &self.message).finish()
    }
}

/// Identity of an [`Item`] for diffing.
///
/// This is the combined hash of the message ID and the identity-relevant part
/// of its content. It's computed with a fixed-key hasher, so the same message
/// always yields the same key within a process.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(u64);

impl ItemKey {
    fn of(message: &Message) -> Self {
        let mut hasher = DefaultHasher::new();
        message.message_id().hash(&mut hasher);
        message.kind().hash_identity(&mut hasher);
        Self(hasher.finish())
    }

    /// The raw hash value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemKey({:016x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use message_list_test::{BOB, MessageFactory};
    use serde_json::json;

    use super::Item;
    use crate::message::Message;

    fn item(json: serde_json::Value) -> Item {
        Item::new(Message::from_json(json).unwrap())
    }

    #[test]
    fn test_key_is_deterministic() {
        let f = MessageFactory::new();
        let json = f.text("hello").id("m1").into_json();

        assert_eq!(item(json.clone()).key(), item(json).key());
    }

    #[test]
    fn test_text_change_changes_key() {
        let f = MessageFactory::new();
        let a = item(f.text("hello").id("m1").into_json());
        let b = item(f.text("hello, edited").id("m1").into_json());

        assert_ne!(a, b);
    }

    #[test]
    fn test_id_change_changes_key() {
        let f = MessageFactory::new();
        let a = item(f.text("hello").id("m1").into_json());
        let b = item(f.text("hello").id("m2").into_json());

        assert_ne!(a, b);
    }

    #[test]
    fn test_ignored_fields_keep_key() {
        let f = MessageFactory::new();

        // Sender and timestamp are not part of the identity.
        let a = item(f.text("hello").id("m1").into_json());
        let b = item(f.text("hello").id("m1").sender(&BOB).server_ts(42).into_json());
        assert_eq!(a, b);

        let a = item(f.custom(Some(json!({ "poll": "a" }))).id("c1").into_json());
        let b = item(f.custom(Some(json!({ "poll": "b" }))).id("c1").into_json());
        assert_eq!(a, b);
        assert_ne!(a.message(), b.message());
    }

    #[test]
    fn test_contact_identity_is_display_name() {
        let f = MessageFactory::new();
        let a = item(f.contact("Alice").id("m1").into_json());
        let b = item(f.contact("Alice").id("m1").into_json());
        let c = item(f.contact("Bob").id("m1").into_json());

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_video_identity_is_placeholder() {
        let f = MessageFactory::new();
        let a = item(f.video(Some("https://example.org/a.mp4"), "thumb").id("m1").into_json());
        let b = item(f.video(Some("https://example.org/b.mp4"), "thumb").id("m1").into_json());
        let c = item(f.video(Some("https://example.org/a.mp4"), "other").id("m1").into_json());

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
