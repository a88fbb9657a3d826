// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Binds a declared configuration into a runnable [`Pipeline`].
//!
//! Building is all-or-nothing: every declared stage must bind, in
//! declaration order, or the whole build fails with the first error and no
//! pipeline is produced. Stages constructed before the failure are dropped.

use std::sync::Arc;

use crate::config::{PipelineConfig, StageDeclaration};
use crate::errors::BindError;
use crate::events::LevelSwitch;
use crate::observability::messages::binder::PipelineBuilt;
use crate::observability::messages::StructuredLog;
use crate::pipeline::filter_switch::FilterSwitchProxy;
use crate::pipeline::pipeline::Pipeline;
use crate::resolve::{Activator, ModuleSet};
use crate::traits::{Capability, Component, DestructuringPolicy, Enricher, Filter, Sink};

pub struct PipelineBuilder<'a> {
    modules: &'a ModuleSet,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new(modules: &'a ModuleSet) -> Self {
        Self { modules }
    }

    /// A builder over the process-wide module set.
    pub fn with_global() -> PipelineBuilder<'static> {
        PipelineBuilder {
            modules: ModuleSet::global(),
        }
    }

    pub fn build(&self, config: &PipelineConfig) -> Result<Pipeline, BindError> {
        let activator = Activator::new(self.modules);
        let mut bindings = Vec::new();

        let minimum_level = Arc::new(LevelSwitch::new(config.minimum_level.default));
        let overrides: Vec<(String, Arc<LevelSwitch>)> = config
            .minimum_level
            .overrides
            .iter()
            .map(|(prefix, level)| (prefix.clone(), Arc::new(LevelSwitch::new(*level))))
            .collect();

        let filter_switch =
            FilterSwitchProxy::bind(self.modules, config.filter_switch.as_deref())?;

        let enrichers = bind_section(
            &activator,
            "Enrich",
            &config.enrich,
            Capability::Enricher,
            Component::into_enricher,
            &mut bindings,
        )?;
        let filters = bind_section(
            &activator,
            "Filter",
            &config.filter,
            Capability::Filter,
            Component::into_filter,
            &mut bindings,
        )?;
        let sinks = bind_section(
            &activator,
            "WriteTo",
            &config.write_to,
            Capability::Sink,
            Component::into_sink,
            &mut bindings,
        )?;
        let policies = bind_section(
            &activator,
            "Destructure",
            &config.destructure,
            Capability::DestructuringPolicy,
            Component::into_policy,
            &mut bindings,
        )?;

        PipelineBuilt {
            minimum_level: config.minimum_level.default,
            sink_count: sinks.len(),
            filter_count: filters.len(),
            enricher_count: enrichers.len(),
            policy_count: policies.len(),
            filter_switch_bound: filter_switch.is_bound(),
        }
        .log();

        Ok(Pipeline::new(
            minimum_level,
            overrides,
            filter_switch,
            enrichers,
            filters,
            sinks,
            policies,
            bindings,
        ))
    }
}

/// Bind one configuration section, preserving declaration order.
fn bind_section<T: ?Sized>(
    activator: &Activator<'_>,
    section: &str,
    stages: &[StageDeclaration],
    capability: Capability,
    extract: fn(Component) -> Option<Arc<T>>,
    bindings: &mut Vec<String>,
) -> Result<Vec<Arc<T>>, BindError> {
    let mut components = Vec::with_capacity(stages.len());

    for (index, stage) in stages.iter().enumerate() {
        let label = format!("{}[{}]", section, index);
        let bound = activator.activate(&label, stage, capability)?;
        bindings.push(format!(
            "{} -> {}::{} {}",
            label, bound.module, bound.type_name, bound.path
        ));

        let actual = bound.component.capability();
        let component = extract(bound.component).ok_or(BindError::CapabilityMismatch {
            stage: label,
            type_name: bound.type_name,
            expected: capability,
            actual,
        })?;
        components.push(component);
    }

    Ok(components)
}
