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

use message_list_ui::{Message, MessageListSettings, Snapshot};
use serde_json::Value as JsonValue;

mod conversation;

#[ctor::ctor]
fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .init();
}

/// Parse the given messages and group them the way the host would.
fn group(messages: impl IntoIterator<Item = JsonValue>) -> Snapshot {
    let settings = MessageListSettings::default();
    let messages = messages.into_iter().map(|json| Message::from_json(json).unwrap());
    Snapshot::group_messages(messages, settings.section_grouping).unwrap()
}
