// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types are organized by subsystem:
//! * `messages::binder` - stage resolution, pipeline build, and reload events

pub mod messages;
