// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors produced while binding configured stages to concrete components.
//!
//! Every stage-level variant carries the stage position (e.g. `WriteTo[1]`)
//! and the attempted type name so a failed build is diagnosable without
//! re-running with tracing enabled.

use crate::traits::Capability;
use thiserror::Error;

/// Errors that can occur while resolving, selecting, coercing, or
/// constructing a configured component.
#[derive(Error, Debug)]
pub enum BindError {
    /// The stage's type name does not match any type in any registered module.
    #[error("Stage '{stage}': type '{type_name}' was not found in any registered module")]
    UnresolvedType { stage: String, type_name: String },

    /// The stage's type name matched in more than one module.
    #[error(
        "Stage '{stage}': type '{type_name}' is ambiguous; it is provided by modules: {}",
        .modules.join(", ")
    )]
    AmbiguousType {
        stage: String,
        type_name: String,
        modules: Vec<String>,
    },

    /// No construction path's required parameters are satisfiable.
    #[error(
        "Stage '{stage}': no construction overload of '{type_name}' matches the supplied arguments (missing: [{}]; unexpected: [{}])",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    NoMatchingOverload {
        stage: String,
        type_name: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// A supplied value cannot be converted to the parameter's type.
    #[error(
        "Stage '{stage}': cannot convert '{literal}' to {target} for parameter '{parameter}' of '{type_name}'"
    )]
    CoercionFailure {
        stage: String,
        type_name: String,
        parameter: String,
        literal: String,
        target: String,
    },

    /// The resolved type provides a different capability than the stage
    /// position requires (e.g. a formatter declared under `WriteTo`).
    #[error(
        "Stage '{stage}': type '{type_name}' provides the {actual} capability, but this position requires {expected}"
    )]
    CapabilityMismatch {
        stage: String,
        type_name: String,
        expected: Capability,
        actual: Capability,
    },

    /// An optional capability was used while no provider module is present.
    /// Non-fatal during pipeline construction; an error only when an accessor
    /// is invoked on the absent proxy.
    #[error("The {capability} capability is not available: no provider module is registered")]
    CapabilityAbsent { capability: Capability },

    /// A construction factory reported a failure.
    #[error("Stage '{stage}': constructing '{type_name}' failed: {reason}")]
    Factory {
        stage: String,
        type_name: String,
        reason: String,
    },

    /// A recursively configured child component failed to bind.
    #[error("Stage '{stage}': argument '{parameter}' of '{type_name}' failed to bind")]
    Nested {
        stage: String,
        type_name: String,
        parameter: String,
        #[source]
        source: Box<BindError>,
    },
}

/// Failure reported from inside a construction factory.
///
/// Factories never see stage context; the activator wraps this into
/// [`BindError::Factory`] with the stage and type attached.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct FactoryError(pub String);

impl FactoryError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}
