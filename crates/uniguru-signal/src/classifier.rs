// SPDX-FileCopyrightText: 2026 Uniguru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classifier capability and provider registry.
//!
//! Instead of probing well-known module paths at runtime, integrators
//! register concrete [`IntentClassifier`] providers with a
//! [`ClassifierRegistry`]. An empty registry (or one whose providers all
//! report unavailable) puts the attacher in passive mode; nothing else
//! changes.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::SignalError;

/// An external intent/behavior classifier.
///
/// Presence is optional and never assumed. `classify` receives the request
/// text and returns whatever the classifier produces, as JSON; the attacher
/// maps recognized keys conservatively and keeps the rest verbatim.
#[async_trait]
pub trait IntentClassifier: Send + Sync + 'static {
    /// Human-readable provider name, used in diagnostics only.
    fn name(&self) -> &str;

    /// Whether this provider can currently serve calls.
    ///
    /// An unavailable provider is skipped in favor of the next registered
    /// one, mirroring "missing module, try next candidate" semantics.
    fn is_available(&self) -> bool {
        true
    }

    /// Classify the given text.
    async fn classify(&self, text: &str) -> Result<Value, SignalError>;
}

/// Ordered registry of classifier providers.
///
/// Providers are tried in registration order; the first available one wins.
/// Lookup happens on every attach call (no caching), so a provider may
/// change its availability between requests.
#[derive(Default)]
pub struct ClassifierRegistry {
    providers: Vec<Arc<dyn IntentClassifier>>,
}

impl ClassifierRegistry {
    /// Create an empty registry. The attacher stays passive until a
    /// provider is registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider at the end of the probe order.
    pub fn register(&mut self, provider: Arc<dyn IntentClassifier>) {
        debug!(provider = provider.name(), "registered classifier provider");
        self.providers.push(provider);
    }

    /// Number of registered providers, available or not.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// True when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Return the first available provider, or `None` for passive mode.
    pub fn locate(&self) -> Option<Arc<dyn IntentClassifier>> {
        for provider in &self.providers {
            if provider.is_available() {
                debug!(provider = provider.name(), "located classifier");
                return Some(Arc::clone(provider));
            }
            debug!(
                provider = provider.name(),
                "classifier provider unavailable, trying next"
            );
        }

        info!("no intent classifier available; attacher is passive");
        None
    }
}
