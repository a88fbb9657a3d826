// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for stage binding and pipeline lifecycle events.

use crate::events::Level;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A stage resolved and constructed successfully.
///
/// # Log Level
/// `debug!` - per-stage detail
pub struct StageBound<'a> {
    pub stage: &'a str,
    pub type_name: &'a str,
    pub module: &'a str,
    pub path: &'a str,
}

impl Display for StageBound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Bound stage '{}' to {}::{} via {}",
            self.stage, self.module, self.type_name, self.path
        )
    }
}

impl StructuredLog for StageBound<'_> {
    fn log(&self) {
        tracing::debug!(
            stage = self.stage,
            type_name = self.type_name,
            module = self.module,
            path = self.path,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "stage_bound",
            span_name = name,
            stage = self.stage,
            type_name = self.type_name,
            module = self.module,
        )
    }
}

/// A full pipeline finished binding.
///
/// # Log Level
/// `info!` - important operational event
pub struct PipelineBuilt {
    pub minimum_level: Level,
    pub sink_count: usize,
    pub filter_count: usize,
    pub enricher_count: usize,
    pub policy_count: usize,
    pub filter_switch_bound: bool,
}

impl Display for PipelineBuilt {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline built at minimum level {}: {} sinks, {} filters, {} enrichers, {} policies, filter switch {}",
            self.minimum_level,
            self.sink_count,
            self.filter_count,
            self.enricher_count,
            self.policy_count,
            if self.filter_switch_bound { "bound" } else { "absent" }
        )
    }
}

impl StructuredLog for PipelineBuilt {
    fn log(&self) {
        tracing::info!(
            minimum_level = %self.minimum_level,
            sink_count = self.sink_count,
            filter_count = self.filter_count,
            enricher_count = self.enricher_count,
            policy_count = self.policy_count,
            filter_switch_bound = self.filter_switch_bound,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_built",
            span_name = name,
            minimum_level = %self.minimum_level,
            sink_count = self.sink_count,
        )
    }
}

/// The optional filter switch capability bound to a provider module.
///
/// # Log Level
/// `debug!` - per-build detail
pub struct FilterSwitchBound<'a> {
    pub module: &'a str,
}

impl Display for FilterSwitchBound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Filter switch bound from module '{}'", self.module)
    }
}

impl StructuredLog for FilterSwitchBound<'_> {
    fn log(&self) {
        tracing::debug!(module = self.module, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("filter_switch_bound", span_name = name, module = self.module)
    }
}

/// No provider module supplies the filter switch capability; expression
/// filtering degrades silently.
///
/// # Log Level
/// `debug!` - absence is a normal, non-fatal state
pub struct FilterSwitchAbsent<'a> {
    pub attempted: &'a [&'a str],
}

impl Display for FilterSwitchAbsent<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Filter switch capability absent; tried modules: {}",
            self.attempted.join(", ")
        )
    }
}

impl StructuredLog for FilterSwitchAbsent<'_> {
    fn log(&self) {
        tracing::debug!(attempted = ?self.attempted, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("filter_switch_absent", span_name = name)
    }
}

/// A live-reload applied the narrow reloadable settings.
///
/// # Log Level
/// `info!` - important operational event
pub struct PipelineReloaded {
    pub minimum_level: Level,
    pub override_count: usize,
}

impl Display for PipelineReloaded {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline reloaded: minimum level {}, {} overrides refreshed",
            self.minimum_level, self.override_count
        )
    }
}

impl StructuredLog for PipelineReloaded {
    fn log(&self) {
        tracing::info!(
            minimum_level = %self.minimum_level,
            override_count = self.override_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_reloaded",
            span_name = name,
            minimum_level = %self.minimum_level,
        )
    }
}
