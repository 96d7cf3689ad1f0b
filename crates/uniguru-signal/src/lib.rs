// SPDX-FileCopyrightText: 2026 Uniguru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passive signal attacher for UniGuru request pipelines.
//!
//! Enriches an inbound request with advisory metadata from an external,
//! possibly-absent intent classifier, without ever influencing control
//! flow. The caller registers classifier providers (if it has any) and
//! adapts its request type to [`SignalHost`] once; from then on,
//! [`SignalAttacher::attach`] fires a detached background task that
//! classifies the request text and stores a [`Signal`] in the first
//! attachment slot the request exposes.
//!
//! Restrictions for integrators: the attacher is non-blocking and passive.
//! It must not be used to decide, enforce, or alter behavior; the signal is
//! advisory context only.

pub mod attacher;
pub mod classifier;
pub mod config;
pub mod error;
pub mod host;
pub mod signal;

// Re-export key items at crate root for ergonomic imports.
pub use attacher::SignalAttacher;
pub use classifier::{ClassifierRegistry, IntentClassifier};
pub use config::SignalConfig;
pub use error::SignalError;
pub use host::{SignalHost, SlotMap};
pub use signal::Signal;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_is_fully_constructed_by_every_constructor() {
        // Every constructor yields a complete record; raw is never empty.
        for signal in [
            Signal::unavailable(),
            Signal::no_text(),
            Signal::from_error(&SignalError::classifier("x")),
            Signal::from_output(serde_json::json!(null)),
        ] {
            assert!(!signal.raw.is_empty());
        }
    }

    #[test]
    fn public_surface_is_exported() {
        // Compile-time check that the seams stay public.
        fn _assert_host<T: SignalHost>() {}
        fn _assert_classifier<T: IntentClassifier>() {}
        let _ = ClassifierRegistry::new();
        let _ = SignalConfig::default();
    }
}
