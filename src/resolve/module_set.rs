// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use super::schema::TypeSchema;

/// A registrable source of activatable types.
///
/// Modules are the unit of optional distribution: the resolver searches
/// registered modules in registration order, and the filter switch proxy
/// degrades gracefully when a provider module is simply never registered.
#[derive(Debug, Clone)]
pub struct ProviderModule {
    pub name: String,
    pub types: Vec<Arc<TypeSchema>>,
}

impl ProviderModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    pub fn with_type(mut self, schema: TypeSchema) -> Self {
        self.types.push(Arc::new(schema));
        self
    }

    /// Find a type by name within this module. With `fold_case` the
    /// comparison is case-insensitive.
    pub fn find(&self, type_name: &str, fold_case: bool) -> Option<&Arc<TypeSchema>> {
        self.types.iter().find(|schema| {
            if fold_case {
                schema.type_name.eq_ignore_ascii_case(type_name)
            } else {
                schema.type_name == type_name
            }
        })
    }
}

/// The set of provider modules consulted during type resolution.
///
/// Append-only and deduplicated by module name: registration is idempotent,
/// entries are never removed, and a registration is visible to every
/// subsequent lookup. A guarded append is all the synchronization this
/// needs; resolution works on a snapshot of the list.
#[derive(Debug, Default)]
pub struct ModuleSet {
    modules: RwLock<Vec<Arc<ProviderModule>>>,
}

impl ModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide module set. Embedders that want isolation (tests,
    /// multiple independent pipelines) construct their own `ModuleSet`
    /// instead.
    pub fn global() -> &'static ModuleSet {
        static GLOBAL: OnceLock<ModuleSet> = OnceLock::new();
        GLOBAL.get_or_init(ModuleSet::new)
    }

    /// Register a provider module. Returns `false` when a module with the
    /// same name is already present (the existing registration wins).
    pub fn register(&self, module: ProviderModule) -> bool {
        let mut modules = self
            .modules
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if modules.iter().any(|m| m.name == module.name) {
            return false;
        }
        modules.push(Arc::new(module));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|m| m.name == name)
    }

    /// The registered modules in registration order.
    pub fn snapshot(&self) -> Vec<Arc<ProviderModule>> {
        self.modules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.modules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FactoryError;

    fn module(name: &str, types: &[&str]) -> ProviderModule {
        let mut module = ProviderModule::new(name);
        for type_name in types {
            module = module
                .with_type(TypeSchema::new(*type_name).path(vec![], |_| {
                    Err(FactoryError::new("test schema"))
                }));
        }
        module
    }

    #[test]
    fn test_registration_is_idempotent() {
        let set = ModuleSet::new();
        assert!(set.register(module("a", &["X"])));
        assert!(!set.register(module("a", &["Y"])));
        assert_eq!(set.len(), 1);

        // The first registration wins.
        let snapshot = set.snapshot();
        assert!(snapshot[0].find("X", false).is_some());
        assert!(snapshot[0].find("Y", false).is_none());
    }

    #[test]
    fn test_snapshot_preserves_registration_order() {
        let set = ModuleSet::new();
        set.register(module("first", &[]));
        set.register(module("second", &[]));
        set.register(module("third", &[]));

        let names: Vec<String> = set.snapshot().iter().map(|m| m.name.clone()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_registration_visible_to_subsequent_lookups() {
        let set = ModuleSet::new();
        assert!(!set.contains("late"));
        set.register(module("late", &["T"]));
        assert!(set.contains("late"));
        assert!(set.snapshot()[0].find("T", false).is_some());
    }

    #[test]
    fn test_find_case_folding() {
        let m = module("m", &["ConsoleSink"]);
        assert!(m.find("ConsoleSink", false).is_some());
        assert!(m.find("consolesink", false).is_none());
        assert!(m.find("consolesink", true).is_some());
    }
}
