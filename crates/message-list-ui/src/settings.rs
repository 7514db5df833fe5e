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

use chrono::{DateTime, Datelike as _, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Default height of the typing indicator view.
pub const DEFAULT_TYPING_INDICATOR_HEIGHT: f64 = 62.0;

/// Default space above the typing indicator view.
pub const DEFAULT_TYPING_INDICATOR_TOP_INSET: f64 = 15.0;

/// Settings of a message list.
///
/// Hosts usually keep the defaults; the struct can also be loaded from the
/// host's own configuration file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageListSettings {
    /// Height of the typing indicator view, unless the layout delegate says
    /// otherwise.
    pub typing_indicator_height: f64,

    /// Space above the typing indicator view, unless the layout delegate says
    /// otherwise.
    pub typing_indicator_top_inset: f64,

    /// How messages are bucketed into sections by
    /// [`Snapshot::group_messages`](crate::Snapshot::group_messages).
    pub section_grouping: SectionGrouping,

    /// What to do with a custom message nobody knows how to render.
    pub missing_renderer_policy: MissingRendererPolicy,
}

impl Default for MessageListSettings {
    fn default() -> Self {
        Self {
            typing_indicator_height: DEFAULT_TYPING_INDICATOR_HEIGHT,
            typing_indicator_top_inset: DEFAULT_TYPING_INDICATOR_TOP_INSET,
            section_grouping: SectionGrouping::Daily,
            missing_renderer_policy: MissingRendererPolicy::FailFast,
        }
    }
}

/// The time bucket messages are grouped by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionGrouping {
    /// One section per calendar day.
    #[default]
    Daily,
    /// One section per calendar month.
    Monthly,
}

impl SectionGrouping {
    /// The start of the bucket `date` falls in, in UTC.
    pub fn bucket(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        let day = date.date_naive();
        let first = match self {
            Self::Daily => Some(day),
            Self::Monthly => day.with_day(1),
        };

        first.map_or(date, |first| first.and_time(NaiveTime::MIN).and_utc())
    }
}

/// What the cell resolver does when a custom message has no renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRendererPolicy {
    /// Return [`Error::MissingCustomRenderer`](crate::Error::MissingCustomRenderer).
    #[default]
    FailFast,
    /// Log the error and return
    /// [`RenderedCell::Unrendered`](crate::RenderedCell::Unrendered).
    Skip,
}
