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

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::typing::TYPING_INDICATOR_SECTION_IDENTIFIER;

/// A run of consecutive messages that share a time bucket, usually a
/// calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Section {
    date: DateTime<Utc>,
    identifier: Arc<str>,
}

impl Section {
    /// Create a section whose identifier is derived from its date.
    pub fn new(date: DateTime<Utc>) -> Self {
        Self { date, identifier: default_identifier(date).into() }
    }

    /// Create a section with an explicit identifier.
    ///
    /// Two sections on the same date stay distinct as long as their
    /// identifiers differ.
    pub fn with_identifier(date: DateTime<Utc>, identifier: impl Into<Arc<str>>) -> Self {
        Self { date, identifier: identifier.into() }
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Whether this is the section holding the typing indicator.
    pub fn is_typing_indicator(&self) -> bool {
        &*self.identifier == TYPING_INDICATOR_SECTION_IDENTIFIER
    }

    /// The key identifying this section across snapshots.
    pub fn key(&self) -> SectionKey {
        SectionKey { date: self.date, identifier: self.identifier.clone() }
    }
}

/// Identity of a [`Section`] for diffing: its date and its identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SectionKey {
    date: DateTime<Utc>,
    identifier: Arc<str>,
}

impl SectionKey {
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// The identifier given to a section created without one.
///
/// This is the RFC 3339 form of the date in UTC, so it always starts with a
/// digit or a sign.
pub fn default_identifier(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
