// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Proxy over the optional expression-filtering capability.
//!
//! The capability lives in a separately registrable provider module. At bind
//! time the proxy probes a fixed list of well-known module names; if any of
//! them supplies the switch type, the proxy is permanently bound to that
//! instance, otherwise it is permanently absent. Absence is silent at the
//! filtering seam and an explicit error at the accessor seam.

use std::fmt;
use std::sync::Arc;

use crate::config::StageDeclaration;
use crate::errors::BindError;
use crate::events::LogEvent;
use crate::observability::messages::binder::{FilterSwitchAbsent, FilterSwitchBound};
use crate::observability::messages::StructuredLog;
use crate::resolve::{Activator, ModuleSet};
use crate::traits::{Capability, ExpressionSwitch};

/// Module names probed for the switch type, in order.
pub const FILTER_SWITCH_MODULES: &[&str] =
    &["pipewright.expressions", "pipewright.filters.expressions"];

const FILTER_SWITCH_TYPE: &str = "LoggingFilterSwitch";

/// The bound-or-absent state of the optional filter switch.
///
/// The state is fixed at bind time and never changes for the lifetime of the
/// proxy; registering a provider module afterwards affects only pipelines
/// built later.
pub enum FilterSwitchProxy {
    Bound(Arc<dyn ExpressionSwitch>),
    Absent,
}

impl FilterSwitchProxy {
    /// Probe the well-known provider modules and bind the first switch found.
    ///
    /// A module that is simply not registered yields absence; any other
    /// binding failure from a module that is present propagates as an error.
    pub fn bind(modules: &ModuleSet, expression: Option<&str>) -> Result<Self, BindError> {
        let activator = Activator::new(modules);

        for &module in FILTER_SWITCH_MODULES {
            let qualified = format!("{}.{}", module, FILTER_SWITCH_TYPE);
            let stage = StageDeclaration::new(qualified);

            match activator.activate("FilterSwitch", &stage, Capability::FilterSwitch) {
                Ok(bound) => {
                    let switch = bound.component.into_filter_switch().ok_or_else(|| {
                        BindError::CapabilityMismatch {
                            stage: "FilterSwitch".to_string(),
                            type_name: bound.type_name,
                            expected: Capability::FilterSwitch,
                            actual: Capability::Filter,
                        }
                    })?;
                    if let Some(expression) = expression {
                        switch.set_expression(expression);
                    }
                    FilterSwitchBound { module }.log();
                    return Ok(FilterSwitchProxy::Bound(switch));
                }
                Err(BindError::UnresolvedType { .. }) => continue,
                Err(other) => return Err(other),
            }
        }

        FilterSwitchAbsent {
            attempted: FILTER_SWITCH_MODULES,
        }
        .log();
        Ok(FilterSwitchProxy::Absent)
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, FilterSwitchProxy::Bound(_))
    }

    /// Current expression, or an error when the capability is absent.
    pub fn expression(&self) -> Result<String, BindError> {
        match self {
            FilterSwitchProxy::Bound(switch) => Ok(switch.expression()),
            FilterSwitchProxy::Absent => Err(BindError::CapabilityAbsent {
                capability: Capability::FilterSwitch,
            }),
        }
    }

    /// Replace the expression, or an error when the capability is absent.
    pub fn set_expression(&self, expression: &str) -> Result<(), BindError> {
        match self {
            FilterSwitchProxy::Bound(switch) => {
                switch.set_expression(expression);
                Ok(())
            }
            FilterSwitchProxy::Absent => Err(BindError::CapabilityAbsent {
                capability: Capability::FilterSwitch,
            }),
        }
    }

    /// Filtering seam: an absent switch passes everything.
    pub(crate) fn allows(&self, event: &LogEvent) -> bool {
        match self {
            FilterSwitchProxy::Bound(switch) => switch.is_enabled(event),
            FilterSwitchProxy::Absent => true,
        }
    }
}

impl fmt::Debug for FilterSwitchProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSwitchProxy::Bound(switch) => f
                .debug_tuple("FilterSwitchProxy::Bound")
                .field(&switch.expression())
                .finish(),
            FilterSwitchProxy::Absent => f.write_str("FilterSwitchProxy::Absent"),
        }
    }
}
