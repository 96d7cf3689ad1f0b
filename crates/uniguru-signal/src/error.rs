// SPDX-FileCopyrightText: 2026 Uniguru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the signal pipeline.
//!
//! These exist so classifier implementations have a typed error to return.
//! They never cross the public entry point: every failure in the background
//! pipeline is converted into a diagnostic [`Signal`](crate::Signal) or a log
//! line instead.

use thiserror::Error;

/// Errors produced inside the signal pipeline.
#[derive(Debug, Error)]
pub enum SignalError {
    /// The classifier was invoked and failed (API failure, model error,
    /// malformed request).
    #[error("classifier error: {message}")]
    Classifier {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The classifier call exceeded the configured time budget.
    #[error("classifier timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },
}

impl SignalError {
    /// Shorthand for a classifier failure with no underlying source.
    pub fn classifier(message: impl Into<String>) -> Self {
        Self::Classifier {
            message: message.into(),
            source: None,
        }
    }
}
