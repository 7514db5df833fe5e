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

//! Choosing the cell that represents an item.
//!
//! Each message kind belongs to a [`RenderFamily`]. For most families the
//! integrator gets a chance to provide its own cell through
//! [`CellOverrides`], and a built-in cell is used otherwise. Link previews
//! are always built in; custom messages are never built in, so the
//! integrator must render them.

use as_variant::as_variant;
use tracing::error;

use crate::{
    Error, Result,
    geometry::EdgeInsets,
    item::Item,
    message::{Message, MessageKindTag},
    settings::{MessageListSettings, MissingRendererPolicy},
    snapshot::{IndexPath, Snapshot},
};

/// Groups of message kinds that are rendered the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderFamily {
    /// Text, attributed text and emoji.
    Text,
    /// Photos and videos.
    Media,
    Location,
    Audio,
    Contact,
    LinkPreview,
    Custom,
}

impl RenderFamily {
    /// Whether the integrator may replace the built-in cell of this family.
    pub fn is_overridable(&self) -> bool {
        !matches!(self, Self::LinkPreview)
    }

    /// Whether this family has a built-in cell.
    pub fn has_built_in_cell(&self) -> bool {
        !matches!(self, Self::Custom)
    }
}

impl MessageKindTag {
    /// The family messages of this kind are rendered with.
    pub fn render_family(&self) -> RenderFamily {
        match self {
            Self::Text | Self::AttributedText | Self::Emoji => RenderFamily::Text,
            Self::Photo | Self::Video => RenderFamily::Media,
            Self::Location => RenderFamily::Location,
            Self::Audio => RenderFamily::Audio,
            Self::Contact => RenderFamily::Contact,
            Self::LinkPreview => RenderFamily::LinkPreview,
            Self::Custom => RenderFamily::Custom,
        }
    }
}

/// The size of the area the list is laid out in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Width of the list.
    pub width: f64,
    /// Insets applied to every section.
    pub section_insets: EdgeInsets,
}

impl Viewport {
    pub const fn new(width: f64, section_insets: EdgeInsets) -> Self {
        Self { width, section_insets }
    }

    /// The width left for content once section insets are applied.
    pub fn content_width(&self) -> f64 {
        self.width - self.section_insets.horizontal()
    }
}

/// What cells are resolved and sized against: the snapshot being displayed,
/// the viewport and the list settings.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    snapshot: &'a Snapshot,
    viewport: Viewport,
    settings: &'a MessageListSettings,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        snapshot: &'a Snapshot,
        viewport: Viewport,
        settings: &'a MessageListSettings,
    ) -> Self {
        Self { snapshot, viewport, settings }
    }

    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn settings(&self) -> &'a MessageListSettings {
        self.settings
    }

    /// Whether the section at `index` holds the typing indicator.
    pub fn is_section_reserved_for_typing(&self, index: usize) -> bool {
        self.snapshot.is_section_reserved_for_typing(index)
    }
}

/// The integrator's hook to provide its own cells.
///
/// Every method returns `None` by default, meaning "no opinion", in which
/// case the built-in cell of the family is used. `custom_cell` is the
/// exception: there is no built-in cell for custom messages, so an
/// implementation that may see custom messages must override it.
///
/// `C` is the host's cell type.
pub trait CellOverrides<C> {
    fn text_cell(
        &self,
        _message: &Message,
        _position: IndexPath,
        _context: &RenderContext<'_>,
    ) -> Option<C> {
        None
    }

    fn media_cell(
        &self,
        _message: &Message,
        _position: IndexPath,
        _context: &RenderContext<'_>,
    ) -> Option<C> {
        None
    }

    fn location_cell(
        &self,
        _message: &Message,
        _position: IndexPath,
        _context: &RenderContext<'_>,
    ) -> Option<C> {
        None
    }

    fn audio_cell(
        &self,
        _message: &Message,
        _position: IndexPath,
        _context: &RenderContext<'_>,
    ) -> Option<C> {
        None
    }

    fn contact_cell(
        &self,
        _message: &Message,
        _position: IndexPath,
        _context: &RenderContext<'_>,
    ) -> Option<C> {
        None
    }

    /// The cell of a custom message. Returning `None` is an error.
    fn custom_cell(
        &self,
        _message: &Message,
        _position: IndexPath,
        _context: &RenderContext<'_>,
    ) -> Option<C> {
        None
    }
}

/// [`CellOverrides`] that never overrides anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOverrides;

impl<C> CellOverrides<C> for NoOverrides {}

/// A built-in cell bound to the message it displays.
#[derive(Clone, Copy, Debug)]
pub struct BuiltInCell<'a> {
    pub family: RenderFamily,
    pub message: &'a Message,
    pub position: IndexPath,
}

/// The outcome of resolving the cell of an item.
#[derive(Debug)]
pub enum RenderedCell<'a, C> {
    /// The typing indicator.
    TypingIndicator { position: IndexPath },
    /// One of the built-in cells.
    BuiltIn(BuiltInCell<'a>),
    /// A cell provided by the integrator.
    Custom(C),
    /// Nothing could render the item and the resolver was asked to skip it.
    Unrendered { position: IndexPath },
}

impl<'a, C> RenderedCell<'a, C> {
    pub fn as_built_in(&self) -> Option<&BuiltInCell<'a>> {
        as_variant!(self, Self::BuiltIn)
    }

    pub fn as_custom(&self) -> Option<&C> {
        as_variant!(self, Self::Custom)
    }

    pub fn into_custom(self) -> Option<C> {
        as_variant!(self, Self::Custom)
    }

    pub fn is_typing_indicator(&self) -> bool {
        matches!(self, Self::TypingIndicator { .. })
    }
}

/// Maps items to cells.
#[derive(Clone, Debug, Default)]
pub struct CellResolver<O> {
    overrides: O,
    missing_renderer_policy: MissingRendererPolicy,
}

impl<O> CellResolver<O> {
    pub fn new(overrides: O) -> Self {
        Self { overrides, missing_renderer_policy: MissingRendererPolicy::default() }
    }

    /// Create a resolver configured from the list settings.
    pub fn with_settings(overrides: O, settings: &MessageListSettings) -> Self {
        Self::new(overrides).with_missing_renderer_policy(settings.missing_renderer_policy)
    }

    /// Choose what happens when a custom message has no renderer.
    pub fn with_missing_renderer_policy(mut self, policy: MissingRendererPolicy) -> Self {
        self.missing_renderer_policy = policy;
        self
    }

    pub fn overrides(&self) -> &O {
        &self.overrides
    }

    /// Resolve the cell of `item`, displayed at `position`.
    ///
    /// The typing indicator section is recognized first; any item in it is
    /// rendered as the typing indicator. Other items are dispatched on the
    /// kind of their message.
    pub fn resolve<'a, C>(
        &self,
        item: &'a Item,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Result<RenderedCell<'a, C>>
    where
        O: CellOverrides<C>,
    {
        if context.is_section_reserved_for_typing(position.section) {
            return Ok(RenderedCell::TypingIndicator { position });
        }

        let message = item.message();
        let family = message.kind().tag().render_family();
        let overrides = &self.overrides;

        let custom = match family {
            RenderFamily::Text => overrides.text_cell(message, position, context),
            RenderFamily::Media => overrides.media_cell(message, position, context),
            RenderFamily::Location => overrides.location_cell(message, position, context),
            RenderFamily::Audio => overrides.audio_cell(message, position, context),
            RenderFamily::Contact => overrides.contact_cell(message, position, context),
            RenderFamily::LinkPreview => None,
            RenderFamily::Custom => {
                return match overrides.custom_cell(message, position, context) {
                    Some(cell) => Ok(RenderedCell::Custom(cell)),
                    None => self.missing_custom_renderer(position),
                };
            }
        };

        Ok(match custom {
            Some(cell) => RenderedCell::Custom(cell),
            None => RenderedCell::BuiltIn(BuiltInCell { family, message, position }),
        })
    }

    /// Resolve the cell of the item at `position` in the context's snapshot.
    pub fn resolve_at<'a, C>(
        &self,
        position: IndexPath,
        context: &RenderContext<'a>,
    ) -> Result<RenderedCell<'a, C>>
    where
        O: CellOverrides<C>,
    {
        let snapshot = context.snapshot();
        let item = snapshot.item(position).ok_or(Error::ItemNotFound(position))?;
        self.resolve(item, position, context)
    }

    fn missing_custom_renderer<'a, C>(&self, position: IndexPath) -> Result<RenderedCell<'a, C>> {
        match self.missing_renderer_policy {
            MissingRendererPolicy::FailFast => Err(Error::MissingCustomRenderer { position }),
            MissingRendererPolicy::Skip => {
                error!(%position, "No renderer registered for custom content, skipping the item");
                Ok(RenderedCell::Unrendered { position })
            }
        }
    }
}
