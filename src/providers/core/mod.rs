// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The built-in provider module.
//!
//! Supplies a small set of generally useful sinks, filters, enrichers,
//! formatters, and destructuring policies under the module name
//! `pipewright.core`. Registration is explicit; nothing registers itself.

mod enrichers;
mod filters;
mod formatters;
mod policies;
mod sinks;

pub use enrichers::{PropertyEnricher, SequenceEnricher};
pub use filters::LevelRangeFilter;
pub use formatters::{MessageOnlyFormatter, TemplateFormatter};
pub use policies::{MaxDepthPolicy, StripPropertyPolicy};
pub use sinks::{ConsoleSink, MemorySink};

use crate::resolve::{ModuleSet, ProviderModule};

/// Name the core module registers under.
pub const CORE_MODULE: &str = "pipewright.core";

/// Build the core provider module.
pub fn core_module() -> ProviderModule {
    ProviderModule::new(CORE_MODULE)
        .with_type(sinks::ConsoleSink::schema())
        .with_type(sinks::MemorySink::schema())
        .with_type(filters::LevelRangeFilter::schema())
        .with_type(enrichers::PropertyEnricher::schema())
        .with_type(enrichers::SequenceEnricher::schema())
        .with_type(formatters::TemplateFormatter::schema())
        .with_type(formatters::MessageOnlyFormatter::schema())
        .with_type(policies::StripPropertyPolicy::schema())
        .with_type(policies::MaxDepthPolicy::schema())
}

/// Register the core module with `modules`. Idempotent.
pub fn register_core(modules: &ModuleSet) -> bool {
    modules.register(core_module())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_module_lists_expected_types() {
        let module = core_module();
        assert_eq!(module.name, CORE_MODULE);

        for type_name in [
            "ConsoleSink",
            "MemorySink",
            "LevelRangeFilter",
            "PropertyEnricher",
            "SequenceEnricher",
            "TemplateFormatter",
            "MessageOnlyFormatter",
            "StripPropertyPolicy",
            "MaxDepthPolicy",
        ] {
            assert!(
                module.find(type_name, false).is_some(),
                "missing type '{}'",
                type_name
            );
        }
    }

    #[test]
    fn test_register_core_is_idempotent() {
        let modules = ModuleSet::new();
        assert!(register_core(&modules));
        assert!(!register_core(&modules));
        assert_eq!(modules.len(), 1);
    }
}
