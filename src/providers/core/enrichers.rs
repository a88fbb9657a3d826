// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::events::{LogEvent, PropertyValue};
use crate::resolve::{ParamSpec, ParamType, TypeSchema};
use crate::traits::{Component, Enricher};

/// Attaches a fixed scalar property to every event.
pub struct PropertyEnricher {
    name: String,
    value: String,
}

impl PropertyEnricher {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub(super) fn schema() -> TypeSchema {
        TypeSchema::new("PropertyEnricher").path(
            vec![
                ParamSpec::required("name", ParamType::Str),
                ParamSpec::required("value", ParamType::Str),
            ],
            |args| {
                Ok(Component::Enricher(Arc::new(PropertyEnricher::new(
                    args.string("name")?,
                    args.string("value")?,
                ))))
            },
        )
    }
}

impl Enricher for PropertyEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        event
            .properties
            .insert(self.name.clone(), PropertyValue::scalar(self.value.clone()));
    }
}

/// Attaches a fixed sequence property to every event.
pub struct SequenceEnricher {
    name: String,
    values: Vec<String>,
}

impl SequenceEnricher {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub(super) fn schema() -> TypeSchema {
        TypeSchema::new("SequenceEnricher").path(
            vec![
                ParamSpec::required("name", ParamType::Str),
                ParamSpec::required("values", ParamType::Seq(Box::new(ParamType::Str))),
            ],
            |args| {
                let values = args
                    .sequence("values")?
                    .iter()
                    .map(|item| match item {
                        crate::resolve::ArgValue::Str(s) => Ok(s.clone()),
                        other => Err(crate::errors::FactoryError::new(format!(
                            "'values' element is {:?}, expected Str",
                            other
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Component::Enricher(Arc::new(SequenceEnricher::new(
                    args.string("name")?,
                    values,
                ))))
            },
        )
    }
}

impl Enricher for SequenceEnricher {
    fn enrich(&self, event: &mut LogEvent) {
        let items = self
            .values
            .iter()
            .map(|v| PropertyValue::scalar(v.clone()))
            .collect();
        event
            .properties
            .insert(self.name.clone(), PropertyValue::Sequence(items));
    }
}
