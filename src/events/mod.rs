// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Log event model shared by all activatable components.
//!
//! The binder itself never emits log events; these types exist so the
//! capability contracts (`Sink`, `Filter`, `Enricher`, `DestructuringPolicy`)
//! have a concrete shape to operate on.

mod level;

pub use level::{Level, LevelSwitch, ParseLevelError};

use indexmap::IndexMap;

/// A structured property value attached to a log event.
///
/// Destructuring policies consume and produce these: a policy may replace a
/// `Structure` with a reduced one, or decline and leave the value untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Scalar(String),
    Sequence(Vec<PropertyValue>),
    Structure(IndexMap<String, PropertyValue>),
}

impl PropertyValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        PropertyValue::Scalar(value.into())
    }

    /// Nesting depth of the value: scalars are depth 1.
    pub fn depth(&self) -> usize {
        match self {
            PropertyValue::Scalar(_) => 1,
            PropertyValue::Sequence(items) => {
                1 + items.iter().map(PropertyValue::depth).max().unwrap_or(0)
            }
            PropertyValue::Structure(fields) => {
                1 + fields.values().map(PropertyValue::depth).max().unwrap_or(0)
            }
        }
    }
}

/// One log event flowing through a built pipeline.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: Level,
    pub message: String,
    /// Dotted name of the emitting component, used for level overrides.
    pub source_context: Option<String>,
    pub properties: IndexMap<String, PropertyValue>,
}

impl LogEvent {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            source_context: None,
            properties: IndexMap::new(),
        }
    }

    pub fn for_context(mut self, context: impl Into<String>) -> Self {
        self.source_context = Some(context.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }
}
