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

use thiserror::Error;

use crate::{IndexPath, SectionKey};

/// Errors of the message list.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A custom message reached dispatch but the integrator's overrides
    /// didn't produce a cell for it.
    #[error("no renderer registered for custom content at {position}")]
    MissingCustomRenderer {
        /// Where the custom message sits in the snapshot.
        position: IndexPath,
    },

    /// The size of a custom message was requested but the layout delegate
    /// didn't provide a calculator for it.
    #[error("no size calculator registered for custom content at {position}")]
    MissingCustomSizeCalculator {
        /// Where the custom message sits in the snapshot.
        position: IndexPath,
    },

    /// A message carries a content type outside of the supported set.
    #[error("unsupported message kind `{0}`")]
    UnsupportedMessageKind(String),

    /// A message couldn't be deserialized.
    #[error("invalid message: {0}")]
    InvalidMessage(#[from] serde_json::Error),

    /// Two sections of the same snapshot have the same key.
    #[error("section {0:?} appears twice in the snapshot")]
    DuplicateSection(SectionKey),

    /// No item exists at this position in the snapshot.
    #[error("no item at {0}")]
    ItemNotFound(IndexPath),
}

impl Error {
    /// Whether this error means the integrator broke the contract of the
    /// message list, as opposed to handing it bad data.
    ///
    /// These are programming errors; they are reported as errors so a render
    /// pass can decide to skip the offending item instead of aborting.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingCustomRenderer { .. }
                | Self::MissingCustomSizeCalculator { .. }
                | Self::UnsupportedMessageKind(_)
        )
    }
}

/// A `Result` with this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
