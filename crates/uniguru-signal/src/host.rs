// SPDX-FileCopyrightText: 2026 Uniguru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request capability interface.
//!
//! The original duck-typed probing ("does it have `.context`? `.meta`? can I
//! set an attribute?") becomes an explicit capability set. The integration
//! layer implements [`SignalHost`] once per concrete request type; every
//! method defaults to "capability absent", so an adapter only implements
//! what its request actually supports. The attacher degrades gracefully
//! across any subset, including the empty one.

use dashmap::DashMap;

use crate::signal::Signal;

/// A shared signal mapping exposed by a request's `context` or `meta` slot.
///
/// Writes come from a detached background task, so the map is internally
/// synchronized; hosts hand out `&SlotMap` without extra locking.
#[derive(Debug, Default)]
pub struct SlotMap {
    entries: DashMap<String, Signal>,
}

impl SlotMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a signal under `key`, replacing any previous one.
    pub fn insert(&self, key: &str, signal: Signal) {
        self.entries.insert(key.to_string(), signal);
    }

    /// Clone out the signal stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Signal> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Capabilities a request object may expose to the signal attacher.
///
/// The attacher consults these in a fixed priority order: `context_slot`,
/// then `meta_slot`, then `put_field`, then `put_entry`. A host that
/// supports none of them still works; the signal is discarded with a
/// warning.
pub trait SignalHost: Send + Sync {
    /// The text to classify, if the request carries any.
    fn text(&self) -> Option<String> {
        None
    }

    /// A mutable `context` mapping, the preferred attachment slot.
    fn context_slot(&self) -> Option<&SlotMap> {
        None
    }

    /// A mutable `meta` mapping, consulted after `context`.
    fn meta_slot(&self) -> Option<&SlotMap> {
        None
    }

    /// Attribute-style assignment. Returns true if the signal was stored.
    fn put_field(&self, _key: &str, _signal: Signal) -> bool {
        false
    }

    /// Key-style assignment for dict-like requests, the last resort.
    /// Returns true if the signal was stored.
    fn put_entry(&self, _key: &str, _signal: Signal) -> bool {
        false
    }
}
