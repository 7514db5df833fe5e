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

//! Layout queries and their defaults.
//!
//! The layout pass asks a [`LayoutDelegate`] for every size it needs. All
//! queries have a default, so an integrator only implements the ones it
//! wants to change; [`DefaultLayout`] implements none. `None` answers mean
//! "use your own default", which for alignments and avatar sizes depends
//! on whether the message is incoming or outgoing, and for size calculators
//! means the built-in calculator of the message kind.
//!
//! Custom messages have no built-in calculator: the delegate must provide
//! one, see [`size_calculator_for`].

use std::fmt;

use crate::{
    Error, Result,
    dispatch::RenderContext,
    geometry::{LabelAlignment, Size},
    item::Item,
    message::{Message, MessageKindTag},
    snapshot::IndexPath,
};

/// Computes the size of a message cell.
pub trait CellSizeCalculator: Send + Sync {
    fn cell_size(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Size;
}

/// Layout queries, consulted for every visible element of the list.
///
/// Implementations must be free of side effects: the layout pass may ask
/// the same question several times and in any order.
#[allow(unused_variables)]
pub trait LayoutDelegate {
    /// Size of the header view of a section.
    fn header_view_size(&self, section: usize, context: &RenderContext<'_>) -> Size {
        Size::ZERO
    }

    /// Size of the footer view of a section.
    fn footer_view_size(&self, section: usize, context: &RenderContext<'_>) -> Size {
        Size::ZERO
    }

    /// Size of the typing indicator view.
    ///
    /// Defaults to the content width of the viewport and the configured
    /// typing indicator height.
    fn typing_indicator_view_size(&self, context: &RenderContext<'_>) -> Size {
        Size::new(context.viewport().content_width(), context.settings().typing_indicator_height)
    }

    /// Space above the typing indicator view.
    fn typing_indicator_view_top_inset(&self, context: &RenderContext<'_>) -> f64 {
        context.settings().typing_indicator_top_inset
    }

    /// Height of the label above the whole cell.
    fn cell_top_label_height(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> f64 {
        0.0
    }

    /// Height of the label below the whole cell.
    fn cell_bottom_label_height(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> f64 {
        0.0
    }

    /// Height of the label right above the message bubble.
    fn message_top_label_height(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> f64 {
        0.0
    }

    /// Height of the label right below the message bubble.
    fn message_bottom_label_height(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> f64 {
        0.0
    }

    fn message_top_label_alignment(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Option<LabelAlignment> {
        None
    }

    fn message_bottom_label_alignment(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Option<LabelAlignment> {
        None
    }

    fn avatar_size(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Option<Size> {
        None
    }

    fn text_cell_size_calculator(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Option<&dyn CellSizeCalculator> {
        None
    }

    fn attributed_text_cell_size_calculator(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Option<&dyn CellSizeCalculator> {
        None
    }

    fn emoji_cell_size_calculator(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Option<&dyn CellSizeCalculator> {
        None
    }

    fn photo_cell_size_calculator(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Option<&dyn CellSizeCalculator> {
        None
    }

    fn video_cell_size_calculator(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Option<&dyn CellSizeCalculator> {
        None
    }

    fn location_cell_size_calculator(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Option<&dyn CellSizeCalculator> {
        None
    }

    fn audio_cell_size_calculator(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Option<&dyn CellSizeCalculator> {
        None
    }

    fn contact_cell_size_calculator(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Option<&dyn CellSizeCalculator> {
        None
    }

    /// The calculator of custom messages. There is no built-in one, so
    /// leaving this to `None` while custom messages are displayed is an
    /// error.
    fn custom_cell_size_calculator(
        &self,
        message: &Message,
        position: IndexPath,
        context: &RenderContext<'_>,
    ) -> Option<&dyn CellSizeCalculator> {
        None
    }
}

/// A [`LayoutDelegate`] answering every query with its default.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLayout;

impl LayoutDelegate for DefaultLayout {}

/// The calculator to size a message cell with.
#[derive(Clone, Copy)]
pub enum SizeCalculator<'a> {
    /// The item is the typing indicator, sized by
    /// [`LayoutDelegate::typing_indicator_view_size`].
    TypingIndicator,
    /// Provided by the layout delegate.
    Delegate(&'a dyn CellSizeCalculator),
    /// The built-in calculator for messages of this kind.
    BuiltIn(MessageKindTag),
}

impl SizeCalculator<'_> {
    pub fn is_built_in(&self) -> bool {
        matches!(self, Self::BuiltIn(_))
    }

    pub fn is_typing_indicator(&self) -> bool {
        matches!(self, Self::TypingIndicator)
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for SizeCalculator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypingIndicator => f.write_str("TypingIndicator"),
            Self::Delegate(_) => f.write_str("Delegate"),
            Self::BuiltIn(tag) => f.debug_tuple("BuiltIn").field(tag).finish(),
        }
    }
}

/// Pick the calculator for the cell of `item`.
///
/// Items of the typing indicator section are recognized first and need no
/// calculator. Otherwise the delegate's calculator for the message kind
/// wins, and the built-in one is used as a fallback. Link previews always
/// use the built-in calculator. Custom messages without a delegate
/// calculator are an error.
pub fn size_calculator_for<'d, D>(
    delegate: &'d D,
    item: &Item,
    position: IndexPath,
    context: &RenderContext<'_>,
) -> Result<SizeCalculator<'d>>
where
    D: LayoutDelegate + ?Sized,
{
    if context.is_section_reserved_for_typing(position.section) {
        return Ok(SizeCalculator::TypingIndicator);
    }

    let message = item.message();
    let tag = message.kind().tag();

    let from_delegate = match tag {
        MessageKindTag::Text => delegate.text_cell_size_calculator(message, position, context),
        MessageKindTag::AttributedText => {
            delegate.attributed_text_cell_size_calculator(message, position, context)
        }
        MessageKindTag::Emoji => delegate.emoji_cell_size_calculator(message, position, context),
        MessageKindTag::Photo => delegate.photo_cell_size_calculator(message, position, context),
        MessageKindTag::Video => delegate.video_cell_size_calculator(message, position, context),
        MessageKindTag::Location => {
            delegate.location_cell_size_calculator(message, position, context)
        }
        MessageKindTag::Audio => delegate.audio_cell_size_calculator(message, position, context),
        MessageKindTag::Contact => {
            delegate.contact_cell_size_calculator(message, position, context)
        }
        MessageKindTag::LinkPreview => None,
        MessageKindTag::Custom => {
            return delegate
                .custom_cell_size_calculator(message, position, context)
                .map(SizeCalculator::Delegate)
                .ok_or(Error::MissingCustomSizeCalculator { position });
        }
    };

    Ok(from_delegate.map_or(SizeCalculator::BuiltIn(tag), SizeCalculator::Delegate))
}
