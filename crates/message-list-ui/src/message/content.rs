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

//! The closed set of message payloads.

use std::{fmt, hash::Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use url::Url;

use crate::geometry::Size;

/// Stands in for a missing photo URL when hashing.
const NULL_URL: &str = "null";

/// Every custom payload hashes to this, whatever it contains.
const CUSTOM_CONTENT_HASH: u64 = 0;

/// The payload of a [`Message`](super::Message).
///
/// Exactly one variant is populated per message. Supporting a new kind of
/// content means adding a variant here, which the compiler then reports at
/// every place that dispatches on it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum MessageKind {
    /// Plain text.
    Text(String),
    /// Text with formatting runs.
    AttributedText(AttributedText),
    Photo(MediaItem),
    Video(MediaItem),
    Location(LocationItem),
    /// A message made only of emoji, usually rendered larger than text.
    Emoji(String),
    Audio(AudioItem),
    Contact(ContactItem),
    LinkPreview(LinkItem),
    /// Content the integrating application renders itself.
    Custom(Option<JsonValue>),
}

impl MessageKind {
    /// The tag of this variant.
    pub fn tag(&self) -> MessageKindTag {
        match self {
            Self::Text(_) => MessageKindTag::Text,
            Self::AttributedText(_) => MessageKindTag::AttributedText,
            Self::Photo(_) => MessageKindTag::Photo,
            Self::Video(_) => MessageKindTag::Video,
            Self::Location(_) => MessageKindTag::Location,
            Self::Emoji(_) => MessageKindTag::Emoji,
            Self::Audio(_) => MessageKindTag::Audio,
            Self::Contact(_) => MessageKindTag::Contact,
            Self::LinkPreview(_) => MessageKindTag::LinkPreview,
            Self::Custom(_) => MessageKindTag::Custom,
        }
    }

    /// Feed the part of the payload that takes part in item identity.
    ///
    /// Only what changes the rendered cell is hashed. Custom payloads are
    /// opaque and all hash the same.
    pub(crate) fn hash_identity<H: Hasher>(&self, state: &mut H) {
        use std::hash::Hash;

        match self {
            Self::Text(text) | Self::Emoji(text) => text.hash(state),
            Self::AttributedText(text) => text.hash(state),
            Self::Photo(media) => media.url.as_ref().map_or(NULL_URL, Url::as_str).hash(state),
            Self::Video(media) => media.placeholder_image.hash(state),
            Self::Location(location) => {
                location.latitude.to_bits().hash(state);
                location.longitude.to_bits().hash(state);
            }
            Self::Audio(audio) => audio.url.as_str().hash(state),
            Self::Contact(contact) => contact.display_name.hash(state),
            Self::LinkPreview(link) => link.url.as_str().hash(state),
            Self::Custom(_) => CUSTOM_CONTENT_HASH.hash(state),
        }
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Message bodies end up in logs; only print the kind.
        f.debug_tuple("MessageKind").field(&self.tag()).finish()
    }
}

/// The variant of a [`MessageKind`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKindTag {
    Text,
    AttributedText,
    Photo,
    Video,
    Location,
    Emoji,
    Audio,
    Contact,
    LinkPreview,
    Custom,
}

impl MessageKindTag {
    /// All the tags, in declaration order.
    pub const ALL: [MessageKindTag; 10] = [
        Self::Text,
        Self::AttributedText,
        Self::Photo,
        Self::Video,
        Self::Location,
        Self::Emoji,
        Self::Audio,
        Self::Contact,
        Self::LinkPreview,
        Self::Custom,
    ];

    /// The name used for this kind in serialized messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::AttributedText => "attributed_text",
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Location => "location",
            Self::Emoji => "emoji",
            Self::Audio => "audio",
            Self::Contact => "contact",
            Self::LinkPreview => "link_preview",
            Self::Custom => "custom",
        }
    }

    /// Look a tag up by its serialized name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == name)
    }
}

impl fmt::Display for MessageKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text with formatting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributedText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runs: Vec<AttributeRun>,
}

impl AttributedText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), runs: Vec::new() }
    }
}

/// A text attribute applied to the byte range `start..end` of an
/// [`AttributedText`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeRun {
    pub start: usize,
    pub end: usize,
    pub attribute: TextAttribute,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TextAttribute {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Link(Url),
    /// A color in `#rrggbb` notation.
    ForegroundColor(String),
}

/// A reference to an image the host knows how to load, such as an asset name
/// or a cache key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A photo or a video.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Where to fetch the media from, if it's known yet.
    #[serde(default)]
    pub url: Option<Url>,
    /// The image shown until the media is available.
    pub placeholder_image: ImageRef,
    #[serde(default)]
    pub size: Size,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationItem {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub size: Size,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioItem {
    pub url: Url,
    /// Length of the clip, in seconds.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub size: Size,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactItem {
    pub display_name: String,
    #[serde(default)]
    pub initials: String,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
}

/// A URL with the metadata needed to render a preview of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkItem {
    /// The message text the link was found in.
    pub text: String,
    pub url: Url,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub teaser: Option<String>,
    #[serde(default)]
    pub thumbnail_image: Option<ImageRef>,
}
