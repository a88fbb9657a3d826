// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Activation of one configured stage into a constructed component.
//!
//! The activator orchestrates type resolution, overload selection, and
//! value coercion for a single stage declaration. It either produces a
//! fully bound component or an error tagged with the stage position, the
//! attempted type, and the specific sub-failure — never a partially
//! constructed instance.

use crate::config::{ConfigNode, StageDeclaration};
use crate::errors::BindError;
use crate::observability::messages::binder::StageBound;
use crate::observability::messages::StructuredLog;
use crate::resolve::coerce::{coerce, CoercionContext};
use crate::resolve::module_set::ModuleSet;
use crate::resolve::overload::select_path;
use crate::resolve::resolver::{resolve_type, Resolution};
use crate::resolve::schema::BoundArgs;
use crate::traits::{Capability, Component};

/// The result of activation: the constructed component plus the
/// construction path actually used, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct BoundComponent {
    pub component: Component,
    pub type_name: String,
    pub module: String,
    /// Signature of the chosen construction path, e.g. `(levelFilter: Level)`.
    pub path: String,
}

/// Builds configured components against a module set.
pub struct Activator<'a> {
    modules: &'a ModuleSet,
}

impl<'a> Activator<'a> {
    pub fn new(modules: &'a ModuleSet) -> Self {
        Self { modules }
    }

    /// Activate one stage declaration, requiring the produced component to
    /// provide `expected`. `label` is the stage position used in error
    /// attribution (e.g. `WriteTo[1]`).
    pub fn activate(
        &self,
        label: &str,
        stage: &StageDeclaration,
        expected: Capability,
    ) -> Result<BoundComponent, BindError> {
        self.activate_with_implicit(label, stage, expected, &[])
    }

    /// Activate with additional implicit argument names the caller always
    /// supplies (these satisfy required parameters without carrying a
    /// configured value; factories fall back to their own handling).
    pub fn activate_with_implicit(
        &self,
        label: &str,
        stage: &StageDeclaration,
        expected: Capability,
        implicit: &[&str],
    ) -> Result<BoundComponent, BindError> {
        let (module, schema) = match resolve_type(&stage.name, self.modules) {
            Resolution::Found { module, schema } => (module, schema),
            Resolution::NotFound => {
                return Err(BindError::UnresolvedType {
                    stage: label.to_string(),
                    type_name: stage.name.clone(),
                })
            }
            Resolution::Ambiguous { modules } => {
                return Err(BindError::AmbiguousType {
                    stage: label.to_string(),
                    type_name: stage.name.clone(),
                    modules,
                })
            }
        };

        let provided: Vec<String> = stage.args.keys().cloned().collect();
        let selection =
            select_path(&schema, &provided, implicit).map_err(|failure| {
                BindError::NoMatchingOverload {
                    stage: label.to_string(),
                    type_name: schema.type_name.clone(),
                    missing: failure.missing,
                    unexpected: failure.unexpected,
                }
            })?;

        let mut bound = BoundArgs::default();
        for param in &selection.path.params {
            match find_arg(stage, &param.name) {
                Some(node) => {
                    let ctx = CoercionContext {
                        stage: label,
                        type_name: &schema.type_name,
                        parameter: &param.name,
                    };
                    bound.insert(param.name.clone(), coerce(node, &param.ty, self, &ctx)?);
                }
                None => {
                    if let Some(default) = &param.default {
                        bound.insert(param.name.clone(), default.clone());
                    }
                    // Required parameters without a configured value can only
                    // be implicit names; the factory handles those itself.
                }
            }
        }

        let component =
            (selection.path.build)(&bound).map_err(|failure| BindError::Factory {
                stage: label.to_string(),
                type_name: schema.type_name.clone(),
                reason: failure.to_string(),
            })?;

        let actual = component.capability();
        if actual != expected {
            return Err(BindError::CapabilityMismatch {
                stage: label.to_string(),
                type_name: schema.type_name.clone(),
                expected,
                actual,
            });
        }

        let path = selection.path.describe();
        StageBound {
            stage: label,
            type_name: &schema.type_name,
            module: &module,
            path: &path,
        }
        .log();

        Ok(BoundComponent {
            component,
            type_name: schema.type_name.clone(),
            module,
            path,
        })
    }
}

/// Configured argument lookup: exact key first, then case-insensitive.
fn find_arg<'n>(stage: &'n StageDeclaration, name: &str) -> Option<&'n ConfigNode> {
    stage.args.get(name).or_else(|| {
        stage
            .args
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FactoryError;
    use crate::events::{Level, LogEvent};
    use crate::resolve::module_set::ProviderModule;
    use crate::resolve::schema::{ArgValue, ParamSpec, ParamType, TypeSchema};
    use crate::traits::{Filter, Formatter, Sink};
    use std::sync::Arc;

    struct NullSink;
    impl Sink for NullSink {
        fn emit(&self, _event: &LogEvent) {}
    }

    struct ThresholdFilter {
        minimum: Level,
    }
    impl Filter for ThresholdFilter {
        fn is_enabled(&self, event: &LogEvent) -> bool {
            event.level >= self.minimum
        }
    }

    struct PrefixFormatter {
        prefix: String,
    }
    impl Formatter for PrefixFormatter {
        fn format(&self, event: &LogEvent) -> String {
            format!("{}{}", self.prefix, event.message)
        }
    }

    struct FormattingSink {
        formatter: Arc<dyn Formatter>,
    }
    impl Sink for FormattingSink {
        fn emit(&self, event: &LogEvent) {
            let _ = self.formatter.format(event);
        }
    }

    fn test_module() -> ProviderModule {
        ProviderModule::new("test.module")
            .with_type(
                TypeSchema::new("NullSink").path(vec![], |_| {
                    Ok(Component::Sink(Arc::new(NullSink)))
                }),
            )
            .with_type(
                TypeSchema::new("ThresholdFilter").path(
                    vec![ParamSpec::required("levelFilter", ParamType::Level)],
                    |args| {
                        Ok(Component::Filter(Arc::new(ThresholdFilter {
                            minimum: args.level("levelFilter")?,
                        })))
                    },
                ),
            )
            .with_type(
                TypeSchema::new("PrefixFormatter").path(
                    vec![ParamSpec::optional(
                        "prefix",
                        ParamType::Str,
                        ArgValue::Str("> ".to_string()),
                    )],
                    |args| {
                        Ok(Component::Formatter(Arc::new(PrefixFormatter {
                            prefix: args.string("prefix")?.to_string(),
                        })))
                    },
                ),
            )
            .with_type(
                TypeSchema::new("FormattingSink").path(
                    vec![ParamSpec::required(
                        "formatter",
                        ParamType::Component(Capability::Formatter),
                    )],
                    |args| {
                        let formatter = args
                            .component("formatter")?
                            .into_formatter()
                            .ok_or_else(|| FactoryError::new("formatter argument lost"))?;
                        Ok(Component::Sink(Arc::new(FormattingSink { formatter })))
                    },
                ),
            )
            .with_type(
                TypeSchema::new("AlwaysFails").path(vec![], |_| {
                    Err(FactoryError::new("refusing to construct"))
                }),
            )
    }

    fn modules() -> ModuleSet {
        let set = ModuleSet::new();
        set.register(test_module());
        set
    }

    #[test]
    fn test_activate_zero_argument_stage() {
        let set = modules();
        let activator = Activator::new(&set);
        let bound = activator
            .activate("WriteTo[0]", &StageDeclaration::new("NullSink"), Capability::Sink)
            .unwrap();

        assert_eq!(bound.type_name, "NullSink");
        assert_eq!(bound.module, "test.module");
        assert_eq!(bound.path, "()");
    }

    #[test]
    fn test_activate_with_coerced_enum_argument() {
        let set = modules();
        let activator = Activator::new(&set);
        let stage = StageDeclaration::new("ThresholdFilter")
            .with_arg("levelFilter", ConfigNode::scalar("Warning"));

        let bound = activator
            .activate("Filter[0]", &stage, Capability::Filter)
            .unwrap();
        let filter = bound.component.into_filter().unwrap();

        assert!(!filter.is_enabled(&LogEvent::new(Level::Information, "x")));
        assert!(filter.is_enabled(&LogEvent::new(Level::Error, "x")));
    }

    #[test]
    fn test_activate_nested_component_argument() {
        let set = modules();
        let activator = Activator::new(&set);

        let mut formatter_args = indexmap::IndexMap::new();
        formatter_args.insert("prefix".to_string(), ConfigNode::scalar(">> "));
        let mut formatter_node = indexmap::IndexMap::new();
        formatter_node.insert("Name".to_string(), ConfigNode::scalar("PrefixFormatter"));
        formatter_node.insert("Args".to_string(), ConfigNode::Object(formatter_args));

        let stage = StageDeclaration::new("FormattingSink")
            .with_arg("formatter", ConfigNode::Object(formatter_node));

        let bound = activator
            .activate("WriteTo[0]", &stage, Capability::Sink)
            .unwrap();
        assert_eq!(bound.type_name, "FormattingSink");
    }

    #[test]
    fn test_nested_scalar_shorthand() {
        let set = modules();
        let activator = Activator::new(&set);
        // Optional prefix falls back to its default when the nested stage
        // is declared as a bare type name.
        let stage = StageDeclaration::new("FormattingSink")
            .with_arg("formatter", ConfigNode::scalar("PrefixFormatter"));

        assert!(activator
            .activate("WriteTo[0]", &stage, Capability::Sink)
            .is_ok());
    }

    #[test]
    fn test_unresolved_type_error() {
        let set = modules();
        let activator = Activator::new(&set);
        let err = activator
            .activate("WriteTo[3]", &StageDeclaration::new("NoSuchSink"), Capability::Sink)
            .unwrap_err();

        match &err {
            BindError::UnresolvedType { stage, type_name } => {
                assert_eq!(stage, "WriteTo[3]");
                assert_eq!(type_name, "NoSuchSink");
            }
            other => panic!("expected UnresolvedType, got {:?}", other),
        }
    }

    #[test]
    fn test_no_matching_overload_names_missing_arguments() {
        let set = modules();
        let activator = Activator::new(&set);
        let stage = StageDeclaration::new("ThresholdFilter")
            .with_arg("colour", ConfigNode::scalar("red"));

        let err = activator
            .activate("Filter[0]", &stage, Capability::Filter)
            .unwrap_err();

        match &err {
            BindError::NoMatchingOverload {
                missing,
                unexpected,
                ..
            } => {
                assert_eq!(missing, &vec!["levelFilter".to_string()]);
                assert_eq!(unexpected, &vec!["colour".to_string()]);
            }
            other => panic!("expected NoMatchingOverload, got {:?}", other),
        }
    }

    #[test]
    fn test_coercion_failure_carries_stage_context() {
        let set = modules();
        let activator = Activator::new(&set);
        let stage = StageDeclaration::new("ThresholdFilter")
            .with_arg("levelFilter", ConfigNode::scalar("NotALevel"));

        let err = activator
            .activate("Filter[2]", &stage, Capability::Filter)
            .unwrap_err();

        match &err {
            BindError::CoercionFailure {
                stage,
                type_name,
                parameter,
                literal,
                target,
            } => {
                assert_eq!(stage, "Filter[2]");
                assert_eq!(type_name, "ThresholdFilter");
                assert_eq!(parameter, "levelFilter");
                assert_eq!(literal, "NotALevel");
                assert_eq!(target, "Level");
            }
            other => panic!("expected CoercionFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_capability_mismatch() {
        let set = modules();
        let activator = Activator::new(&set);
        let err = activator
            .activate("Filter[0]", &StageDeclaration::new("NullSink"), Capability::Filter)
            .unwrap_err();
        assert!(matches!(err, BindError::CapabilityMismatch { .. }));
    }

    #[test]
    fn test_factory_failure_is_attributed() {
        let set = modules();
        let activator = Activator::new(&set);
        let err = activator
            .activate("WriteTo[0]", &StageDeclaration::new("AlwaysFails"), Capability::Sink)
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("AlwaysFails"));
        assert!(message.contains("refusing to construct"));
    }

    #[test]
    fn test_nested_failure_is_wrapped() {
        let set = modules();
        let activator = Activator::new(&set);
        let stage = StageDeclaration::new("FormattingSink")
            .with_arg("formatter", ConfigNode::scalar("NoSuchFormatter"));

        let err = activator
            .activate("WriteTo[0]", &stage, Capability::Sink)
            .unwrap_err();

        match &err {
            BindError::Nested {
                parameter, source, ..
            } => {
                assert_eq!(parameter, "formatter");
                assert!(matches!(**source, BindError::UnresolvedType { .. }));
            }
            other => panic!("expected Nested, got {:?}", other),
        }
    }

    #[test]
    fn test_argument_keys_match_case_insensitively() {
        let set = modules();
        let activator = Activator::new(&set);
        let stage = StageDeclaration::new("ThresholdFilter")
            .with_arg("LevelFilter", ConfigNode::scalar("Error"));

        assert!(activator
            .activate("Filter[0]", &stage, Capability::Filter)
            .is_ok());
    }
}
