// SPDX-FileCopyrightText: 2026 Uniguru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fire-and-forget signal attachment.
//!
//! [`SignalAttacher::attach`] returns immediately; the locate → extract →
//! produce → attach pipeline runs on a detached tokio task. The task is
//! non-joinable and non-cancellable, and nothing it does can surface to the
//! caller: failures end up in the signal's `raw` field or in a log line.
//! A caller reading the slot right after `attach` may not see a signal yet;
//! that race is accepted in exchange for never blocking.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::classifier::{ClassifierRegistry, IntentClassifier};
use crate::config::SignalConfig;
use crate::error::SignalError;
use crate::host::SignalHost;
use crate::signal::Signal;

/// Attaches advisory classifier signals to requests without blocking.
///
/// Passive by construction: it observes and annotates, never decides.
pub struct SignalAttacher {
    registry: Arc<ClassifierRegistry>,
    config: SignalConfig,
}

impl SignalAttacher {
    /// Create an attacher over a provider registry with default config.
    pub fn new(registry: Arc<ClassifierRegistry>) -> Self {
        Self::with_config(registry, SignalConfig::default())
    }

    /// Create an attacher with explicit configuration.
    pub fn with_config(registry: Arc<ClassifierRegistry>, config: SignalConfig) -> Self {
        Self { registry, config }
    }

    /// Enrich `request` with a classifier signal, without waiting.
    ///
    /// `text` overrides extraction when provided (an explicitly empty
    /// string counts as provided); otherwise the host's `text()` capability
    /// is consulted. The signal lands under the configured slot key in the
    /// first slot the host exposes, or is discarded with a warning if the
    /// host exposes none. This function has no observable failure mode;
    /// even outside a tokio runtime it only logs and discards.
    pub fn attach(&self, request: Arc<dyn SignalHost>, text: Option<String>) {
        let registry = Arc::clone(&self.registry);
        let slot_key = self.config.slot_key.clone();
        let timeout = self.config.classify_timeout();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(%slot_key, "no tokio runtime; signal discarded");
            return;
        };

        // Detached on purpose. Dropping the join handle makes the task
        // non-joinable; a panic inside integrator code stops at the task
        // boundary and never reaches the caller.
        runtime.spawn(async move {
            let classifier = registry.locate();
            let text = text.or_else(|| request.text());

            let signal = match (classifier, text) {
                (_, None) => Signal::no_text(),
                (None, Some(_)) => Signal::unavailable(),
                (Some(classifier), Some(text)) => {
                    produce(classifier.as_ref(), &text, timeout).await
                }
            };

            attach_to_host(request.as_ref(), &slot_key, signal);
        });
    }
}

/// Invoke the classifier and fold any failure into the signal itself.
async fn produce(
    classifier: &dyn IntentClassifier,
    text: &str,
    timeout: Option<Duration>,
) -> Signal {
    let result = match timeout {
        Some(duration) => match tokio::time::timeout(duration, classifier.classify(text)).await {
            Ok(result) => result,
            Err(_) => Err(SignalError::Timeout { duration }),
        },
        None => classifier.classify(text).await,
    };

    match result {
        Ok(output) => Signal::from_output(output),
        Err(err) => {
            warn!(classifier = classifier.name(), %err, "classifier call failed");
            Signal::from_error(&err)
        }
    }
}

/// Walk the host's attachment slots in priority order.
///
/// Returns true if the signal was stored somewhere. The order mirrors the
/// classic adapter: context mapping, meta mapping, attribute assignment,
/// key assignment, then warn and discard.
fn attach_to_host(host: &dyn SignalHost, slot_key: &str, signal: Signal) -> bool {
    if let Some(context) = host.context_slot() {
        context.insert(slot_key, signal);
        debug!(slot_key, slot = "context", "signal attached");
        return true;
    }

    if let Some(meta) = host.meta_slot() {
        meta.insert(slot_key, signal);
        debug!(slot_key, slot = "meta", "signal attached");
        return true;
    }

    if host.put_field(slot_key, signal.clone()) {
        debug!(slot_key, slot = "field", "signal attached");
        return true;
    }

    if host.put_entry(slot_key, signal) {
        debug!(slot_key, slot = "entry", "signal attached");
        return true;
    }

    warn!(slot_key, "unable to attach signal; no attachment slot available");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SlotMap;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct StaticClassifier(Value);

    #[async_trait]
    impl IntentClassifier for StaticClassifier {
        fn name(&self) -> &str {
            "static"
        }

        async fn classify(&self, _text: &str) -> Result<Value, SignalError> {
            Ok(self.0.clone())
        }
    }

    struct SlowClassifier(Duration);

    #[async_trait]
    impl IntentClassifier for SlowClassifier {
        fn name(&self) -> &str {
            "slow"
        }

        async fn classify(&self, _text: &str) -> Result<Value, SignalError> {
            tokio::time::sleep(self.0).await;
            Ok(json!({"intent": "late"}))
        }
    }

    #[tokio::test]
    async fn produce_maps_successful_output() {
        let classifier = StaticClassifier(json!({"intent": "greeting", "confidence": 0.9}));
        let signal = produce(&classifier, "hello", None).await;

        assert_eq!(signal.intent.as_deref(), Some("greeting"));
        assert_eq!(signal.confidence, Some(0.9));
    }

    #[tokio::test]
    async fn produce_folds_errors_into_signal() {
        struct Failing;

        #[async_trait]
        impl IntentClassifier for Failing {
            fn name(&self) -> &str {
                "failing"
            }

            async fn classify(&self, _text: &str) -> Result<Value, SignalError> {
                Err(SignalError::classifier("boom"))
            }
        }

        let signal = produce(&Failing, "hello", None).await;
        assert!(signal.is_scoreless());
        assert!(signal.raw.contains_key("error"));
    }

    #[tokio::test(start_paused = true)]
    async fn produce_enforces_timeout() {
        let classifier = SlowClassifier(Duration::from_secs(60));
        let signal = produce(&classifier, "hello", Some(Duration::from_millis(50))).await;

        assert!(signal.is_scoreless());
        let recorded = signal.raw.get("error").and_then(Value::as_str).unwrap();
        assert!(recorded.contains("timed out"));
    }

    #[test]
    fn context_slot_preferred_over_meta() {
        struct BothSlots {
            context: SlotMap,
            meta: SlotMap,
        }

        impl SignalHost for BothSlots {
            fn context_slot(&self) -> Option<&SlotMap> {
                Some(&self.context)
            }

            fn meta_slot(&self) -> Option<&SlotMap> {
                Some(&self.meta)
            }
        }

        let host = BothSlots {
            context: SlotMap::new(),
            meta: SlotMap::new(),
        };

        assert!(attach_to_host(&host, "k", Signal::unavailable()));
        assert!(host.context.get("k").is_some());
        assert!(host.meta.is_empty());
    }

    #[test]
    fn field_assignment_used_when_no_mappings() {
        struct FieldOnly {
            stored: Mutex<Option<(String, Signal)>>,
        }

        impl SignalHost for FieldOnly {
            fn put_field(&self, key: &str, signal: Signal) -> bool {
                *self.stored.lock().unwrap() = Some((key.to_string(), signal));
                true
            }
        }

        let host = FieldOnly {
            stored: Mutex::new(None),
        };

        assert!(attach_to_host(&host, "k", Signal::unavailable()));
        let (key, signal) = host.stored.lock().unwrap().take().unwrap();
        assert_eq!(key, "k");
        assert_eq!(signal, Signal::unavailable());
    }

    #[test]
    fn entry_assignment_is_last_resort() {
        struct EntryOnly {
            stored: Mutex<Option<String>>,
        }

        impl SignalHost for EntryOnly {
            fn put_entry(&self, key: &str, _signal: Signal) -> bool {
                *self.stored.lock().unwrap() = Some(key.to_string());
                true
            }
        }

        let host = EntryOnly {
            stored: Mutex::new(None),
        };

        assert!(attach_to_host(&host, "k", Signal::no_text()));
        assert_eq!(host.stored.lock().unwrap().as_deref(), Some("k"));
    }

    #[test]
    fn capability_free_host_discards() {
        struct Frozen;
        impl SignalHost for Frozen {}

        assert!(!attach_to_host(&Frozen, "k", Signal::unavailable()));
    }

    #[test]
    fn attach_outside_runtime_returns_quietly() {
        struct Bare;
        impl SignalHost for Bare {}

        let attacher = SignalAttacher::new(Arc::new(ClassifierRegistry::new()));
        attacher.attach(Arc::new(Bare), Some("hello".to_string()));
    }
}
