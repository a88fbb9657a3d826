// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use indexmap::IndexMap;

use crate::events::PropertyValue;
use crate::resolve::{ParamSpec, ParamType, TypeSchema};
use crate::traits::{Component, DestructuringPolicy};

/// Removes a named field from structured values, at any nesting depth.
///
/// Declines when the value contains no matching field, so later policies
/// still get a chance.
pub struct StripPropertyPolicy {
    name: String,
}

impl StripPropertyPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub(super) fn schema() -> TypeSchema {
        TypeSchema::new("StripPropertyPolicy").path(
            vec![ParamSpec::required("name", ParamType::Str)],
            |args| {
                Ok(Component::Policy(Arc::new(StripPropertyPolicy::new(
                    args.string("name")?,
                ))))
            },
        )
    }

    fn strip(&self, value: &PropertyValue) -> (PropertyValue, bool) {
        match value {
            PropertyValue::Scalar(_) => (value.clone(), false),
            PropertyValue::Sequence(items) => {
                let mut changed = false;
                let stripped = items
                    .iter()
                    .map(|item| {
                        let (item, item_changed) = self.strip(item);
                        changed |= item_changed;
                        item
                    })
                    .collect();
                (PropertyValue::Sequence(stripped), changed)
            }
            PropertyValue::Structure(fields) => {
                let mut changed = false;
                let mut kept = IndexMap::with_capacity(fields.len());
                for (key, child) in fields {
                    if key.eq_ignore_ascii_case(&self.name) {
                        changed = true;
                        continue;
                    }
                    let (child, child_changed) = self.strip(child);
                    changed |= child_changed;
                    kept.insert(key.clone(), child);
                }
                (PropertyValue::Structure(kept), changed)
            }
        }
    }
}

impl DestructuringPolicy for StripPropertyPolicy {
    fn try_destructure(&self, value: &PropertyValue) -> Option<PropertyValue> {
        match self.strip(value) {
            (stripped, true) => Some(stripped),
            (_, false) => None,
        }
    }
}

/// Collapses structures and sequences deeper than a limit into a scalar
/// marker. Declines for values already within the limit.
pub struct MaxDepthPolicy {
    max_depth: usize,
}

impl MaxDepthPolicy {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub(super) fn schema() -> TypeSchema {
        TypeSchema::new("MaxDepthPolicy").path(
            vec![ParamSpec::required("maxDepth", ParamType::Int)],
            |args| {
                let raw = args.integer("maxDepth")?;
                if raw < 1 {
                    return Err(crate::errors::FactoryError::new(format!(
                        "'maxDepth' must be at least 1, got {}",
                        raw
                    )));
                }
                Ok(Component::Policy(Arc::new(MaxDepthPolicy::new(
                    raw as usize,
                ))))
            },
        )
    }

    fn truncate(&self, value: &PropertyValue, remaining: usize) -> PropertyValue {
        if remaining <= 1 {
            return match value {
                PropertyValue::Scalar(_) => value.clone(),
                PropertyValue::Sequence(_) | PropertyValue::Structure(_) => {
                    PropertyValue::scalar("<collapsed>")
                }
            };
        }
        match value {
            PropertyValue::Scalar(_) => value.clone(),
            PropertyValue::Sequence(items) => PropertyValue::Sequence(
                items
                    .iter()
                    .map(|item| self.truncate(item, remaining - 1))
                    .collect(),
            ),
            PropertyValue::Structure(fields) => PropertyValue::Structure(
                fields
                    .iter()
                    .map(|(key, child)| (key.clone(), self.truncate(child, remaining - 1)))
                    .collect(),
            ),
        }
    }
}

impl DestructuringPolicy for MaxDepthPolicy {
    fn try_destructure(&self, value: &PropertyValue) -> Option<PropertyValue> {
        if value.depth() <= self.max_depth {
            return None;
        }
        Some(self.truncate(value, self.max_depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_data() -> PropertyValue {
        let mut fields = IndexMap::new();
        fields.insert("Username".to_string(), PropertyValue::scalar("alice"));
        fields.insert("Password".to_string(), PropertyValue::scalar("hunter2"));
        PropertyValue::Structure(fields)
    }

    #[test]
    fn test_strip_removes_named_field() {
        let policy = StripPropertyPolicy::new("Password");
        let stripped = policy.try_destructure(&login_data()).unwrap();

        match stripped {
            PropertyValue::Structure(fields) => {
                assert!(fields.contains_key("Username"));
                assert!(!fields.contains_key("Password"));
            }
            other => panic!("expected Structure, got {:?}", other),
        }
    }

    #[test]
    fn test_strip_declines_without_a_match() {
        let policy = StripPropertyPolicy::new("Token");
        assert_eq!(policy.try_destructure(&login_data()), None);
        assert_eq!(policy.try_destructure(&PropertyValue::scalar("x")), None);
    }

    #[test]
    fn test_strip_reaches_nested_structures() {
        let mut outer = IndexMap::new();
        outer.insert("Credentials".to_string(), login_data());
        let value = PropertyValue::Structure(outer);

        let policy = StripPropertyPolicy::new("password");
        let stripped = policy.try_destructure(&value).unwrap();

        match stripped {
            PropertyValue::Structure(fields) => match &fields["Credentials"] {
                PropertyValue::Structure(inner) => assert!(!inner.contains_key("Password")),
                other => panic!("expected Structure, got {:?}", other),
            },
            other => panic!("expected Structure, got {:?}", other),
        }
    }

    #[test]
    fn test_max_depth_collapses_deep_values() {
        let policy = MaxDepthPolicy::new(2);

        let mut inner = IndexMap::new();
        inner.insert("leaf".to_string(), PropertyValue::scalar("v"));
        let mut outer = IndexMap::new();
        outer.insert("inner".to_string(), PropertyValue::Structure(inner));
        let deep = PropertyValue::Structure(outer);
        assert_eq!(deep.depth(), 3);

        let truncated = policy.try_destructure(&deep).unwrap();
        assert!(truncated.depth() <= 2);
        match truncated {
            PropertyValue::Structure(fields) => {
                assert_eq!(fields["inner"], PropertyValue::scalar("<collapsed>"));
            }
            other => panic!("expected Structure, got {:?}", other),
        }
    }

    #[test]
    fn test_max_depth_declines_for_shallow_values() {
        let policy = MaxDepthPolicy::new(2);
        assert_eq!(policy.try_destructure(&login_data()), None);
        assert_eq!(policy.try_destructure(&PropertyValue::scalar("x")), None);
    }
}
