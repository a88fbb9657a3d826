// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use super::stage::{DestructuringPolicy, Enricher, ExpressionSwitch, Filter, Formatter, Sink};

/// The behavioral contract a constructed component satisfies.
///
/// Every activatable type produces exactly one capability; the pipeline
/// builder checks the produced capability against the section the stage was
/// declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Sink,
    Filter,
    Enricher,
    DestructuringPolicy,
    Formatter,
    FilterSwitch,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Sink => "sink",
            Capability::Filter => "filter",
            Capability::Enricher => "enricher",
            Capability::DestructuringPolicy => "destructuring policy",
            Capability::Formatter => "formatter",
            Capability::FilterSwitch => "filter switch",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constructed component, tagged by capability.
///
/// This is the closed, tagged-variant dispatch point between the untyped
/// binder and the typed pipeline: factories return a `Component`, and the
/// builder extracts the concrete `Arc<dyn ...>` for the section at hand.
#[derive(Clone)]
pub enum Component {
    Sink(Arc<dyn Sink>),
    Filter(Arc<dyn Filter>),
    Enricher(Arc<dyn Enricher>),
    Policy(Arc<dyn DestructuringPolicy>),
    Formatter(Arc<dyn Formatter>),
    FilterSwitch(Arc<dyn ExpressionSwitch>),
}

impl Component {
    pub fn capability(&self) -> Capability {
        match self {
            Component::Sink(_) => Capability::Sink,
            Component::Filter(_) => Capability::Filter,
            Component::Enricher(_) => Capability::Enricher,
            Component::Policy(_) => Capability::DestructuringPolicy,
            Component::Formatter(_) => Capability::Formatter,
            Component::FilterSwitch(_) => Capability::FilterSwitch,
        }
    }

    pub fn into_sink(self) -> Option<Arc<dyn Sink>> {
        match self {
            Component::Sink(sink) => Some(sink),
            _ => None,
        }
    }

    pub fn into_filter(self) -> Option<Arc<dyn Filter>> {
        match self {
            Component::Filter(filter) => Some(filter),
            _ => None,
        }
    }

    pub fn into_enricher(self) -> Option<Arc<dyn Enricher>> {
        match self {
            Component::Enricher(enricher) => Some(enricher),
            _ => None,
        }
    }

    pub fn into_policy(self) -> Option<Arc<dyn DestructuringPolicy>> {
        match self {
            Component::Policy(policy) => Some(policy),
            _ => None,
        }
    }

    pub fn into_formatter(self) -> Option<Arc<dyn Formatter>> {
        match self {
            Component::Formatter(formatter) => Some(formatter),
            _ => None,
        }
    }

    pub fn into_filter_switch(self) -> Option<Arc<dyn ExpressionSwitch>> {
        match self {
            Component::FilterSwitch(switch) => Some(switch),
            _ => None,
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.capability()).finish()
    }
}
