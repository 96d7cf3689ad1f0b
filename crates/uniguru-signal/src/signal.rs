// SPDX-FileCopyrightText: 2026 Uniguru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The advisory [`Signal`] record and its constructors.
//!
//! A Signal is built exactly once per attach attempt and never mutated
//! afterwards. Whatever the classifier returned (or why it could not be
//! called) is preserved in `raw`, so `raw` is never empty without a
//! diagnostic note.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SignalError;

/// Advisory metadata attached to a request by the signal attacher.
///
/// All scored fields are optional: a conservative extraction either finds a
/// correctly-typed value under the expected key or leaves the field absent.
/// `raw` always carries the classifier's full output, or a note explaining
/// why there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub intent: Option<String>,
    pub confidence: Option<f64>,
    pub ambiguity: Option<f64>,
    pub risk: Option<f64>,
    pub repetition: Option<f64>,
    pub emotional_load: Option<f64>,
    /// The classifier's verbatim output when it was a mapping, a
    /// `{"value": ...}` wrapper when it was not, or a diagnostic
    /// `note`/`error` entry when no output exists.
    pub raw: Map<String, Value>,
}

impl Signal {
    /// Build a Signal from whatever the classifier returned.
    ///
    /// Mapping results get the six named fields extracted by conservative
    /// key lookup; a key that is missing or wrong-typed leaves the field
    /// absent, and the full mapping is copied into `raw` regardless.
    /// Non-mapping results yield all fields absent with the output wrapped
    /// as `raw = {"value": <output>}`.
    pub fn from_output(output: Value) -> Self {
        match output {
            Value::Object(map) => Self {
                intent: map
                    .get("intent")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                confidence: map.get("confidence").and_then(Value::as_f64),
                ambiguity: map.get("ambiguity").and_then(Value::as_f64),
                risk: map.get("risk").and_then(Value::as_f64),
                repetition: map.get("repetition").and_then(Value::as_f64),
                emotional_load: map.get("emotional_load").and_then(Value::as_f64),
                raw: map,
            },
            other => {
                let mut raw = Map::new();
                raw.insert("value".to_string(), other);
                Self::scoreless(raw)
            }
        }
    }

    /// Fallback when no classifier provider resolved. Passive mode.
    pub fn unavailable() -> Self {
        Self::noted("classifier not available")
    }

    /// Fallback when the request yielded no text to classify.
    pub fn no_text() -> Self {
        Self::noted("no text to classify")
    }

    /// Build a Signal recording a failed classifier invocation.
    pub fn from_error(err: &SignalError) -> Self {
        let mut raw = Map::new();
        raw.insert("error".to_string(), Value::String(err.to_string()));
        Self::scoreless(raw)
    }

    fn noted(note: &str) -> Self {
        let mut raw = Map::new();
        raw.insert("note".to_string(), Value::String(note.to_string()));
        Self::scoreless(raw)
    }

    fn scoreless(raw: Map<String, Value>) -> Self {
        Self {
            intent: None,
            confidence: None,
            ambiguity: None,
            risk: None,
            repetition: None,
            emotional_load: None,
            raw,
        }
    }

    /// True when every named score is absent.
    pub fn is_scoreless(&self) -> bool {
        self.intent.is_none()
            && self.confidence.is_none()
            && self.ambiguity.is_none()
            && self.risk.is_none()
            && self.repetition.is_none()
            && self.emotional_load.is_none()
    }
}
