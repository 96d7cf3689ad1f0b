// SPDX-FileCopyrightText: 2026 Uniguru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attacher configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the signal attacher.
///
/// Deserializable so the embedding application can carry it inside its own
/// config tree. Unknown keys are rejected.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SignalConfig {
    /// Key under which the signal is stored in the attachment slot.
    #[serde(default = "default_slot_key")]
    pub slot_key: String,

    /// Optional wall-clock budget for a single classifier call, in
    /// milliseconds. Absent means no bound, matching the classic adapter.
    #[serde(default)]
    pub classify_timeout_ms: Option<u64>,
}

impl SignalConfig {
    /// The configured timeout as a [`Duration`], if any.
    pub fn classify_timeout(&self) -> Option<Duration> {
        self.classify_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            slot_key: default_slot_key(),
            classify_timeout_ms: None,
        }
    }
}

fn default_slot_key() -> String {
    "uniguru_signal".to_string()
}
