// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline construction and execution.
//!
//! [`PipelineBuilder`] turns a [`crate::config::PipelineConfig`] into a
//! [`Pipeline`]; the [`FilterSwitchProxy`] carries the optional
//! expression-filtering capability across both.

mod builder;
mod filter_switch;
#[allow(clippy::module_inception)]
mod pipeline;

pub use builder::PipelineBuilder;
pub use filter_switch::{FilterSwitchProxy, FILTER_SWITCH_MODULES};
pub use pipeline::Pipeline;
