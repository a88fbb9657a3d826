// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Type resolution across registered provider modules.
//!
//! Given a short type name, the resolver searches every registered module in
//! registration order. A name may be qualified as `module.Type`; the
//! qualifier must name a registered module, otherwise the whole string is
//! treated as an unqualified type name (module names themselves contain
//! dots, so the split is on the last dot).

use std::sync::Arc;

use super::module_set::{ModuleSet, ProviderModule};
use super::schema::TypeSchema;

/// Outcome of a type lookup. `NotFound` is a distinguished, non-fatal
/// outcome: required stages turn it into an error, the optional capability
/// proxy turns it into absence.
#[derive(Debug, Clone)]
pub enum Resolution {
    Found {
        module: String,
        schema: Arc<TypeSchema>,
    },
    NotFound,
    Ambiguous {
        modules: Vec<String>,
    },
}

/// Resolve a type name against the module set.
pub fn resolve_type(name: &str, modules: &ModuleSet) -> Resolution {
    let snapshot = modules.snapshot();

    if let Some((qualifier, type_name)) = name.rsplit_once('.') {
        if let Some(module) = snapshot
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(qualifier))
        {
            return resolve_in_module(module, type_name);
        }
    }

    // Unqualified: exact matches across all modules first, then a
    // case-insensitive pass only when no exact match exists.
    let matches = collect_matches(&snapshot, name, false);
    let mut matches = if matches.is_empty() {
        collect_matches(&snapshot, name, true)
    } else {
        matches
    };

    if matches.is_empty() {
        Resolution::NotFound
    } else if matches.len() == 1 {
        let (module, schema) = matches.remove(0);
        Resolution::Found { module, schema }
    } else {
        Resolution::Ambiguous {
            modules: matches.into_iter().map(|(module, _)| module).collect(),
        }
    }
}

fn resolve_in_module(module: &Arc<ProviderModule>, type_name: &str) -> Resolution {
    match module
        .find(type_name, false)
        .or_else(|| module.find(type_name, true))
    {
        Some(schema) => Resolution::Found {
            module: module.name.clone(),
            schema: schema.clone(),
        },
        None => Resolution::NotFound,
    }
}

fn collect_matches(
    snapshot: &[Arc<ProviderModule>],
    name: &str,
    fold_case: bool,
) -> Vec<(String, Arc<TypeSchema>)> {
    snapshot
        .iter()
        .filter_map(|module| {
            module
                .find(name, fold_case)
                .map(|schema| (module.name.clone(), schema.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FactoryError;
    use crate::resolve::schema::TypeSchema;

    fn set_with(modules: &[(&str, &[&str])]) -> ModuleSet {
        let set = ModuleSet::new();
        for (name, types) in modules {
            let mut module = ProviderModule::new(*name);
            for type_name in *types {
                module = module.with_type(
                    TypeSchema::new(*type_name).path(vec![], |_| Err(FactoryError::new("test"))),
                );
            }
            set.register(module);
        }
        set
    }

    #[test]
    fn test_unique_match_is_found() {
        let set = set_with(&[
            ("pipewright.core", &["ConsoleSink", "LevelRangeFilter"]),
            ("acme.sinks", &["HttpSink"]),
        ]);

        match resolve_type("HttpSink", &set) {
            Resolution::Found { module, schema } => {
                assert_eq!(module, "acme.sinks");
                assert_eq!(schema.type_name, "HttpSink");
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_type_is_not_found() {
        let set = set_with(&[("pipewright.core", &["ConsoleSink"])]);
        assert!(matches!(
            resolve_type("NoSuchSink", &set),
            Resolution::NotFound
        ));
    }

    #[test]
    fn test_same_name_in_two_modules_is_ambiguous() {
        let set = set_with(&[
            ("first", &["ConsoleSink"]),
            ("second", &["ConsoleSink"]),
        ]);

        match resolve_type("ConsoleSink", &set) {
            Resolution::Ambiguous { modules } => {
                assert_eq!(modules, vec!["first", "second"]);
            }
            other => panic!("expected Ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_qualified_name_searches_one_module() {
        let set = set_with(&[
            ("first", &["ConsoleSink"]),
            ("second", &["ConsoleSink"]),
        ]);

        // The qualifier disambiguates what would otherwise be ambiguous.
        match resolve_type("second.ConsoleSink", &set) {
            Resolution::Found { module, .. } => assert_eq!(module, "second"),
            other => panic!("expected Found, got {:?}", other),
        }

        // A qualifier naming an unregistered module falls back to an
        // unqualified search of the full dotted string.
        assert!(matches!(
            resolve_type("third.ConsoleSink", &set),
            Resolution::NotFound
        ));
    }

    #[test]
    fn test_qualified_name_with_dotted_module() {
        let set = set_with(&[("pipewright.expressions", &["LoggingFilterSwitch"])]);
        match resolve_type("pipewright.expressions.LoggingFilterSwitch", &set) {
            Resolution::Found { module, .. } => assert_eq!(module, "pipewright.expressions"),
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_match_preferred_over_case_insensitive() {
        let set = set_with(&[
            ("first", &["consolesink"]),
            ("second", &["ConsoleSink"]),
        ]);

        // "ConsoleSink" matches exactly in `second` even though `first`
        // would match case-insensitively.
        match resolve_type("ConsoleSink", &set) {
            Resolution::Found { module, .. } => assert_eq!(module, "second"),
            other => panic!("expected Found, got {:?}", other),
        }

        // A name with no exact match anywhere falls back to case folding,
        // and ambiguity applies at that level too.
        match resolve_type("CONSOLESINK", &set) {
            Resolution::Ambiguous { modules } => assert_eq!(modules.len(), 2),
            other => panic!("expected Ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let set = set_with(&[("m", &["T"])]);
        for _ in 0..3 {
            assert!(matches!(
                resolve_type("T", &set),
                Resolution::Found { .. }
            ));
        }
    }
}
