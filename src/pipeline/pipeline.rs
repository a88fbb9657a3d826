// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The bound, runnable pipeline.
//!
//! A `Pipeline` is immutable in shape: its stages and their order are fixed
//! at build time. The only runtime-mutable state is the level switches and
//! the filter switch expression, which is exactly what [`Pipeline::reload`]
//! touches.

use std::fmt;
use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::events::{Level, LevelSwitch, LogEvent};
use crate::observability::messages::binder::PipelineReloaded;
use crate::observability::messages::StructuredLog;
use crate::pipeline::filter_switch::FilterSwitchProxy;
use crate::traits::{DestructuringPolicy, Enricher, Filter, Sink};

pub struct Pipeline {
    minimum_level: Arc<LevelSwitch>,
    /// Source-context overrides, longest prefix first so the first match
    /// during lookup is the most specific one.
    overrides: Vec<(String, Arc<LevelSwitch>)>,
    filter_switch: FilterSwitchProxy,
    enrichers: Vec<Arc<dyn Enricher>>,
    filters: Vec<Arc<dyn Filter>>,
    sinks: Vec<Arc<dyn Sink>>,
    policies: Vec<Arc<dyn DestructuringPolicy>>,
    /// Human-readable record of what each stage bound to.
    bindings: Vec<String>,
}

impl Pipeline {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        minimum_level: Arc<LevelSwitch>,
        mut overrides: Vec<(String, Arc<LevelSwitch>)>,
        filter_switch: FilterSwitchProxy,
        enrichers: Vec<Arc<dyn Enricher>>,
        filters: Vec<Arc<dyn Filter>>,
        sinks: Vec<Arc<dyn Sink>>,
        policies: Vec<Arc<dyn DestructuringPolicy>>,
        bindings: Vec<String>,
    ) -> Self {
        overrides.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self {
            minimum_level,
            overrides,
            filter_switch,
            enrichers,
            filters,
            sinks,
            policies,
            bindings,
        }
    }

    /// Whether an event at `level` from `source_context` passes the level
    /// gate. The most specific matching override wins; without a match the
    /// default minimum applies.
    pub fn is_enabled(&self, level: Level, source_context: Option<&str>) -> bool {
        let switch = source_context
            .and_then(|context| {
                self.overrides
                    .iter()
                    .find(|(prefix, _)| prefix_matches(prefix, context))
                    .map(|(_, switch)| switch)
            })
            .unwrap_or(&self.minimum_level);
        level >= switch.minimum()
    }

    /// Run one event through the pipeline.
    ///
    /// Order: level gate, filter switch, declared filters, enrichers,
    /// destructuring policies, sinks. The event is mutated in place by
    /// enrichers and policies so the caller sees what the sinks saw.
    pub fn emit(&self, event: &mut LogEvent) {
        if !self.is_enabled(event.level, event.source_context.as_deref()) {
            return;
        }
        if !self.filter_switch.allows(event) {
            return;
        }
        if !self.filters.iter().all(|filter| filter.is_enabled(event)) {
            return;
        }

        for enricher in &self.enrichers {
            enricher.enrich(event);
        }

        if !self.policies.is_empty() {
            for value in event.properties.values_mut() {
                // First policy that accepts a value wins.
                if let Some(replacement) = self
                    .policies
                    .iter()
                    .find_map(|policy| policy.try_destructure(value))
                {
                    *value = replacement;
                }
            }
        }

        for sink in &self.sinks {
            sink.emit(event);
        }
    }

    /// Apply the narrow reloadable subset of a configuration: the default
    /// minimum level, the overrides that existed at build time, and the
    /// filter switch expression when one is bound and declared.
    ///
    /// Stage composition never changes here; overrides for prefixes unknown
    /// at build time are ignored.
    pub fn reload(&self, config: &PipelineConfig) {
        self.minimum_level.set(config.minimum_level.default);

        let mut refreshed = 0;
        for (prefix, switch) in &self.overrides {
            if let Some((_, level)) = config
                .minimum_level
                .overrides
                .iter()
                .find(|(candidate, _)| candidate == prefix)
            {
                switch.set(*level);
                refreshed += 1;
            }
        }

        if self.filter_switch.is_bound() {
            if let Some(expression) = &config.filter_switch {
                // Cannot fail on a bound proxy.
                let _ = self.filter_switch.set_expression(expression);
            }
        }

        PipelineReloaded {
            minimum_level: config.minimum_level.default,
            override_count: refreshed,
        }
        .log();
    }

    pub fn minimum_level(&self) -> Level {
        self.minimum_level.minimum()
    }

    pub fn filter_switch(&self) -> &FilterSwitchProxy {
        &self.filter_switch
    }

    /// One line per bound stage, in declaration order.
    pub fn bindings(&self) -> &[String] {
        &self.bindings
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    pub fn enricher_count(&self) -> usize {
        self.enrichers.len()
    }

    pub fn policy_count(&self) -> usize {
        self.policies.len()
    }
}

fn prefix_matches(prefix: &str, context: &str) -> bool {
    context == prefix
        || (context.starts_with(prefix) && context.as_bytes().get(prefix.len()) == Some(&b'.'))
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("minimum_level", &self.minimum_level.minimum())
            .field("overrides", &self.overrides.len())
            .field("filter_switch", &self.filter_switch)
            .field("enrichers", &self.enrichers.len())
            .field("filters", &self.filters.len())
            .field("sinks", &self.sinks.len())
            .field("policies", &self.policies.len())
            .finish()
    }
}
