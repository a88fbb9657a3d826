// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::events::LogEvent;
use crate::resolve::{ArgValue, ParamSpec, ParamType, TypeSchema};
use crate::traits::{Component, Formatter};

const DEFAULT_TEMPLATE: &str = "{level}: {message}";

/// Renders events through a template with `{level}`, `{message}`, and
/// `{context}` placeholders.
pub struct TemplateFormatter {
    template: String,
}

impl TemplateFormatter {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub(super) fn schema() -> TypeSchema {
        TypeSchema::new("TemplateFormatter").path(
            vec![ParamSpec::optional(
                "template",
                ParamType::Str,
                ArgValue::Str(DEFAULT_TEMPLATE.to_string()),
            )],
            |args| {
                Ok(Component::Formatter(Arc::new(TemplateFormatter::new(
                    args.string("template")?,
                ))))
            },
        )
    }
}

impl Default for TemplateFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl Formatter for TemplateFormatter {
    fn format(&self, event: &LogEvent) -> String {
        self.template
            .replace("{level}", event.level.as_str())
            .replace("{message}", &event.message)
            .replace("{context}", event.source_context.as_deref().unwrap_or(""))
    }
}

/// Renders only the event message.
pub struct MessageOnlyFormatter;

impl MessageOnlyFormatter {
    pub(super) fn schema() -> TypeSchema {
        TypeSchema::new("MessageOnlyFormatter").path(vec![], |_| {
            Ok(Component::Formatter(Arc::new(MessageOnlyFormatter)))
        })
    }
}

impl Formatter for MessageOnlyFormatter {
    fn format(&self, event: &LogEvent) -> String {
        event.message.clone()
    }
}
