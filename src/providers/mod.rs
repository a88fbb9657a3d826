// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in provider modules.
//!
//! * `core` - always-useful stages, registered under `pipewright.core`
//! * `expressions` - the optional expression-filtering capability,
//!   registered under `pipewright.expressions`

pub mod core;
pub mod expressions;
