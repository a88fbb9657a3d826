// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The optional expression-filtering provider module.
//!
//! Registers under `pipewright.expressions` and supplies the
//! `LoggingFilterSwitch` type the filter switch proxy looks for. Deployments
//! that never call [`register_expressions`] simply run without expression
//! filtering; the proxy degrades to its absent state.
//!
//! The expression language is deliberately small:
//! * empty expression passes everything
//! * `Level <op> <name>` compares the event level, where `<op>` is one of
//!   `>=`, `>`, `<=`, `<`, `=`
//! * `Has(<property>)` requires the named property to be present

use std::sync::{Arc, RwLock};

use crate::events::{Level, LogEvent};
use crate::resolve::{ArgValue, ModuleSet, ParamSpec, ParamType, ProviderModule, TypeSchema};
use crate::traits::{Component, ExpressionSwitch, Filter};

/// Name the expressions module registers under. The filter switch proxy
/// probes this module first.
pub const EXPRESSIONS_MODULE: &str = "pipewright.expressions";

/// A filter whose predicate is a runtime-replaceable expression string.
pub struct LoggingFilterSwitch {
    expression: RwLock<String>,
}

impl LoggingFilterSwitch {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: RwLock::new(expression.into()),
        }
    }

    fn schema() -> TypeSchema {
        TypeSchema::new("LoggingFilterSwitch").path(
            vec![ParamSpec::optional(
                "expression",
                ParamType::Str,
                ArgValue::Str(String::new()),
            )],
            |args| {
                Ok(Component::FilterSwitch(Arc::new(LoggingFilterSwitch::new(
                    args.string("expression")?,
                ))))
            },
        )
    }
}

impl Filter for LoggingFilterSwitch {
    fn is_enabled(&self, event: &LogEvent) -> bool {
        let expression = self.expression();
        evaluate(&expression, event)
    }
}

impl ExpressionSwitch for LoggingFilterSwitch {
    fn expression(&self) -> String {
        match self.expression.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_expression(&self, expression: &str) {
        match self.expression.write() {
            Ok(mut guard) => *guard = expression.to_string(),
            Err(poisoned) => *poisoned.into_inner() = expression.to_string(),
        }
    }
}

/// Evaluate an expression against an event. Malformed expressions pass
/// everything rather than dropping events.
fn evaluate(expression: &str, event: &LogEvent) -> bool {
    let expression = expression.trim();
    if expression.is_empty() {
        return true;
    }

    if let Some(inner) = expression
        .strip_prefix("Has(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return event.properties.contains_key(inner.trim());
    }

    if let Some(rest) = expression.strip_prefix("Level") {
        let rest = rest.trim_start();
        // Two-character operators first so ">=" is not read as ">".
        for (op, test) in [
            (">=", Ordering::GreaterOrEqual),
            ("<=", Ordering::LessOrEqual),
            (">", Ordering::Greater),
            ("<", Ordering::Less),
            ("=", Ordering::Equal),
        ] {
            if let Some(literal) = rest.strip_prefix(op) {
                return match literal.trim().parse::<Level>() {
                    Ok(level) => test.holds(event.level, level),
                    Err(_) => true,
                };
            }
        }
    }

    true
}

enum Ordering {
    GreaterOrEqual,
    Greater,
    LessOrEqual,
    Less,
    Equal,
}

impl Ordering {
    fn holds(&self, actual: Level, threshold: Level) -> bool {
        match self {
            Ordering::GreaterOrEqual => actual >= threshold,
            Ordering::Greater => actual > threshold,
            Ordering::LessOrEqual => actual <= threshold,
            Ordering::Less => actual < threshold,
            Ordering::Equal => actual == threshold,
        }
    }
}

/// Build the expressions provider module.
pub fn expressions_module() -> ProviderModule {
    ProviderModule::new(EXPRESSIONS_MODULE).with_type(LoggingFilterSwitch::schema())
}

/// Register the expressions module with `modules`. Idempotent.
pub fn register_expressions(modules: &ModuleSet) -> bool {
    modules.register(expressions_module())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PropertyValue;

    fn event(level: Level) -> LogEvent {
        LogEvent::new(level, "x")
    }

    #[test]
    fn test_expression_evaluation_table_driven() {
        struct TestCase {
            name: &'static str,
            expression: &'static str,
            level: Level,
            enabled: bool,
        }

        let test_cases = vec![
            TestCase { name: "empty passes", expression: "", level: Level::Verbose, enabled: true },
            TestCase { name: "gte pass", expression: "Level >= Warning", level: Level::Error, enabled: true },
            TestCase { name: "gte boundary", expression: "Level >= Warning", level: Level::Warning, enabled: true },
            TestCase { name: "gte fail", expression: "Level >= Warning", level: Level::Debug, enabled: false },
            TestCase { name: "gt boundary", expression: "Level > Warning", level: Level::Warning, enabled: false },
            TestCase { name: "lte pass", expression: "Level <= Information", level: Level::Debug, enabled: true },
            TestCase { name: "lt fail", expression: "Level < Debug", level: Level::Debug, enabled: false },
            TestCase { name: "eq pass", expression: "Level = Error", level: Level::Error, enabled: true },
            TestCase { name: "eq fail", expression: "Level = Error", level: Level::Fatal, enabled: false },
            TestCase { name: "malformed passes", expression: "Level >= Loud", level: Level::Verbose, enabled: true },
            TestCase { name: "unknown shape passes", expression: "what even", level: Level::Verbose, enabled: true },
        ];

        for test_case in test_cases {
            assert_eq!(
                evaluate(test_case.expression, &event(test_case.level)),
                test_case.enabled,
                "Test case '{}'",
                test_case.name
            );
        }
    }

    #[test]
    fn test_has_checks_property_presence() {
        let with_property = LogEvent::new(Level::Information, "x")
            .with_property("RequestId", PropertyValue::scalar("abc"));

        assert!(evaluate("Has(RequestId)", &with_property));
        assert!(!evaluate("Has(RequestId)", &event(Level::Information)));
    }

    #[test]
    fn test_switch_expression_is_replaceable() {
        let switch = LoggingFilterSwitch::new("Level >= Error");
        assert!(!switch.is_enabled(&event(Level::Information)));

        switch.set_expression("Level >= Information");
        assert_eq!(switch.expression(), "Level >= Information");
        assert!(switch.is_enabled(&event(Level::Information)));
    }

    #[test]
    fn test_module_provides_the_switch_type() {
        let module = expressions_module();
        assert_eq!(module.name, EXPRESSIONS_MODULE);
        assert!(module.find("LoggingFilterSwitch", false).is_some());
    }
}
