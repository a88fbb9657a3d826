// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Diagnostic events are modeled as structs implementing `Display` plus the
//! [`StructuredLog`] trait, so call sites never carry magic strings and the
//! structured fields stay consistent across the codebase.

use tracing::Span;

/// A diagnostic event that knows how to emit itself through `tracing`.
pub trait StructuredLog: std::fmt::Display {
    /// Emit the event at its canonical level with structured fields.
    fn log(&self);

    /// Create a span carrying the event's structured fields.
    fn span(&self, name: &str) -> Span;
}

pub mod binder;
