// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Declarative construction schemas for activatable types.
//!
//! Each provider declares its types' parameter lists as data; the overload
//! selector and value coercer operate purely over this data, never over live
//! type introspection. A "construction path" is one constructor overload:
//! an ordered parameter list plus a factory closure.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::errors::FactoryError;
use crate::events::Level;
use crate::traits::{Capability, Component};

/// The semantic type a construction parameter expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Bool,
    Int,
    Float,
    Str,
    Level,
    Seq(Box<ParamType>),
    Component(Capability),
}

impl ParamType {
    /// Human-readable type name used in coercion error messages.
    pub fn name(&self) -> String {
        match self {
            ParamType::Bool => "Bool".to_string(),
            ParamType::Int => "Int".to_string(),
            ParamType::Float => "Float".to_string(),
            ParamType::Str => "Str".to_string(),
            ParamType::Level => "Level".to_string(),
            ParamType::Seq(inner) => format!("Seq<{}>", inner.name()),
            ParamType::Component(capability) => format!("Component<{}>", capability),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A coerced argument value, mirroring [`ParamType`].
#[derive(Debug, Clone)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Level(Level),
    Seq(Vec<ArgValue>),
    Component(Component),
}

/// One parameter of a construction path. A parameter is optional iff it
/// carries a default value.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub ty: ParamType,
    pub default: Option<ArgValue>,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, ty: ParamType, default: ArgValue) -> Self {
        Self {
            name: name.into(),
            ty,
            default: Some(default),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Factory signature shared by all construction paths.
pub type BuildFn = Arc<dyn Fn(&BoundArgs) -> Result<Component, FactoryError> + Send + Sync>;

/// One construction overload of a type: an ordered parameter list plus the
/// factory that builds the component from bound arguments.
#[derive(Clone)]
pub struct ConstructionPath {
    pub params: Vec<ParamSpec>,
    pub build: BuildFn,
}

impl ConstructionPath {
    pub fn required_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| p.is_required())
    }

    /// Signature-style description used in diagnostics, e.g.
    /// `(levelFilter: Level)`.
    pub fn describe(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect();
        format!("({})", params.join(", "))
    }
}

impl fmt::Debug for ConstructionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructionPath")
            .field("signature", &self.describe())
            .finish()
    }
}

/// The declarative schema of one activatable type: its name and its
/// construction paths in declaration order. Declaration order is the
/// overload tie-break, so providers list their most specific paths first
/// only if they want them preferred on ties.
#[derive(Clone)]
pub struct TypeSchema {
    pub type_name: String,
    pub paths: Vec<ConstructionPath>,
}

impl TypeSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            paths: Vec::new(),
        }
    }

    /// Append a construction path. Paths are tried in the order added.
    pub fn path<F>(mut self, params: Vec<ParamSpec>, build: F) -> Self
    where
        F: Fn(&BoundArgs) -> Result<Component, FactoryError> + Send + Sync + 'static,
    {
        self.paths.push(ConstructionPath {
            params,
            build: Arc::new(build),
        });
        self
    }
}

impl fmt::Debug for TypeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSchema")
            .field("type_name", &self.type_name)
            .field("paths", &self.paths)
            .finish()
    }
}

/// Arguments bound for a chosen construction path, keyed by parameter name.
///
/// The activator fills one entry per path parameter (explicit value or
/// default) before invoking the factory, so typed accessors can assume
/// presence for any parameter of the chosen path that has a default or was
/// configured. Accessor misuse surfaces as a [`FactoryError`].
#[derive(Debug, Default)]
pub struct BoundArgs {
    values: IndexMap<String, ArgValue>,
}

impl BoundArgs {
    pub fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    /// Look up an argument: exact name first, then case-insensitive.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name).or_else(|| {
            self.values
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn string(&self, name: &str) -> Result<&str, FactoryError> {
        match self.get(name) {
            Some(ArgValue::Str(s)) => Ok(s),
            other => Err(Self::mismatch(name, "Str", other)),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool, FactoryError> {
        match self.get(name) {
            Some(ArgValue::Bool(b)) => Ok(*b),
            other => Err(Self::mismatch(name, "Bool", other)),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, FactoryError> {
        match self.get(name) {
            Some(ArgValue::Int(i)) => Ok(*i),
            other => Err(Self::mismatch(name, "Int", other)),
        }
    }

    pub fn float(&self, name: &str) -> Result<f64, FactoryError> {
        match self.get(name) {
            Some(ArgValue::Float(f)) => Ok(*f),
            other => Err(Self::mismatch(name, "Float", other)),
        }
    }

    pub fn level(&self, name: &str) -> Result<Level, FactoryError> {
        match self.get(name) {
            Some(ArgValue::Level(level)) => Ok(*level),
            other => Err(Self::mismatch(name, "Level", other)),
        }
    }

    pub fn sequence(&self, name: &str) -> Result<&[ArgValue], FactoryError> {
        match self.get(name) {
            Some(ArgValue::Seq(items)) => Ok(items),
            other => Err(Self::mismatch(name, "Seq", other)),
        }
    }

    pub fn component(&self, name: &str) -> Result<Component, FactoryError> {
        match self.get(name) {
            Some(ArgValue::Component(component)) => Ok(component.clone()),
            other => Err(Self::mismatch(name, "Component", other)),
        }
    }

    fn mismatch(name: &str, expected: &str, actual: Option<&ArgValue>) -> FactoryError {
        match actual {
            None => FactoryError::new(format!("argument '{}' was not bound", name)),
            Some(value) => FactoryError::new(format!(
                "argument '{}' is bound as {:?}, expected {}",
                name, value, expected
            )),
        }
    }
}
