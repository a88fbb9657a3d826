// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::events::{Level, LogEvent};
use crate::resolve::{ArgValue, ParamSpec, ParamType, TypeSchema};
use crate::traits::{Component, Filter};

/// Passes events whose level falls inside an inclusive range.
///
/// Three construction overloads exist: no arguments (pass everything),
/// a single threshold, and an explicit range with an optional upper bound.
pub struct LevelRangeFilter {
    min: Level,
    max: Level,
}

impl LevelRangeFilter {
    pub fn new(min: Level, max: Level) -> Self {
        Self { min, max }
    }

    pub(super) fn schema() -> TypeSchema {
        TypeSchema::new("LevelRangeFilter")
            .path(vec![], |_| {
                Ok(Component::Filter(Arc::new(LevelRangeFilter::new(
                    Level::Verbose,
                    Level::Fatal,
                ))))
            })
            .path(
                vec![ParamSpec::required("levelFilter", ParamType::Level)],
                |args| {
                    Ok(Component::Filter(Arc::new(LevelRangeFilter::new(
                        args.level("levelFilter")?,
                        Level::Fatal,
                    ))))
                },
            )
            .path(
                vec![
                    ParamSpec::required("min", ParamType::Level),
                    ParamSpec::optional("max", ParamType::Level, ArgValue::Level(Level::Fatal)),
                ],
                |args| {
                    Ok(Component::Filter(Arc::new(LevelRangeFilter::new(
                        args.level("min")?,
                        args.level("max")?,
                    ))))
                },
            )
    }
}

impl Filter for LevelRangeFilter {
    fn is_enabled(&self, event: &LogEvent) -> bool {
        self.min <= event.level && event.level <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_inclusive_on_both_ends() {
        let filter = LevelRangeFilter::new(Level::Information, Level::Error);

        struct TestCase {
            name: &'static str,
            level: Level,
            enabled: bool,
        }

        let test_cases = vec![
            TestCase { name: "below range", level: Level::Debug, enabled: false },
            TestCase { name: "lower bound", level: Level::Information, enabled: true },
            TestCase { name: "inside range", level: Level::Warning, enabled: true },
            TestCase { name: "upper bound", level: Level::Error, enabled: true },
            TestCase { name: "above range", level: Level::Fatal, enabled: false },
        ];

        for test_case in test_cases {
            assert_eq!(
                filter.is_enabled(&LogEvent::new(test_case.level, "x")),
                test_case.enabled,
                "Test case '{}'",
                test_case.name
            );
        }
    }

    #[test]
    fn test_schema_declares_three_overloads() {
        let schema = LevelRangeFilter::schema();
        assert_eq!(schema.paths.len(), 3);
        assert_eq!(schema.paths[1].describe(), "(levelFilter: Level)");
        assert_eq!(schema.paths[2].describe(), "(min: Level, max: Level)");
    }
}
