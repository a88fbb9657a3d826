// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, Mutex, PoisonError};

use crate::errors::FactoryError;
use crate::events::LogEvent;
use crate::resolve::{ParamSpec, ParamType, TypeSchema};
use crate::traits::{Capability, Component, Formatter, Sink};

use super::formatters::TemplateFormatter;

/// Writes formatted events to standard output.
pub struct ConsoleSink {
    formatter: Arc<dyn Formatter>,
}

impl ConsoleSink {
    pub fn new(formatter: Arc<dyn Formatter>) -> Self {
        Self { formatter }
    }

    pub(super) fn schema() -> TypeSchema {
        TypeSchema::new("ConsoleSink")
            .path(vec![], |_| {
                Ok(Component::Sink(Arc::new(ConsoleSink::new(Arc::new(
                    TemplateFormatter::default(),
                )))))
            })
            .path(
                vec![ParamSpec::required(
                    "formatter",
                    ParamType::Component(Capability::Formatter),
                )],
                |args| {
                    let formatter = args
                        .component("formatter")?
                        .into_formatter()
                        .ok_or_else(|| FactoryError::new("'formatter' is not a formatter"))?;
                    Ok(Component::Sink(Arc::new(ConsoleSink::new(formatter))))
                },
            )
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, event: &LogEvent) {
        println!("{}", self.formatter.format(event));
    }
}

/// Collects events in memory. Intended for tests and diagnostics.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of everything emitted so far, in emission order.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }

    pub(super) fn schema() -> TypeSchema {
        TypeSchema::new("MemorySink").path(vec![], |_| {
            Ok(Component::Sink(Arc::new(MemorySink::new())))
        })
    }

    /// A schema whose factory hands out `sink` itself rather than a fresh
    /// instance, so callers keep a handle to observe what was emitted.
    /// Register it under a caller-owned module name.
    pub fn capturing_schema(type_name: impl Into<String>, sink: Arc<MemorySink>) -> TypeSchema {
        TypeSchema::new(type_name).path(vec![], move |_| {
            Ok(Component::Sink(sink.clone() as Arc<dyn Sink>))
        })
    }
}

impl Sink for MemorySink {
    fn emit(&self, event: &LogEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
