// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Conversion of raw configuration values into typed construction arguments.
//!
//! Coercion is total and side-effect-free with one exception: a nested
//! component argument recursively runs the activator, whose side effects are
//! scoped to constructing that child instance. Invalid literals always
//! produce a `CoercionFailure` naming the literal and the target type,
//! never a silent default.

use crate::config::{ConfigNode, StageDeclaration};
use crate::errors::BindError;
use crate::events::Level;
use crate::resolve::activator::Activator;
use crate::resolve::schema::{ArgValue, ParamType};

/// Error-attribution context for one argument being coerced.
pub(crate) struct CoercionContext<'a> {
    pub stage: &'a str,
    pub type_name: &'a str,
    pub parameter: &'a str,
}

impl CoercionContext<'_> {
    fn failure(&self, node: &ConfigNode, target: &ParamType) -> BindError {
        BindError::CoercionFailure {
            stage: self.stage.to_string(),
            type_name: self.type_name.to_string(),
            parameter: self.parameter.to_string(),
            literal: node.describe(),
            target: target.name(),
        }
    }
}

/// Coerce one configuration node into the parameter's semantic type.
pub(crate) fn coerce(
    node: &ConfigNode,
    ty: &ParamType,
    activator: &Activator<'_>,
    ctx: &CoercionContext<'_>,
) -> Result<ArgValue, BindError> {
    match ty {
        ParamType::Bool => match node.as_scalar() {
            Some(s) if s.eq_ignore_ascii_case("true") => Ok(ArgValue::Bool(true)),
            Some(s) if s.eq_ignore_ascii_case("false") => Ok(ArgValue::Bool(false)),
            _ => Err(ctx.failure(node, ty)),
        },
        ParamType::Int => node
            .as_scalar()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(ArgValue::Int)
            .ok_or_else(|| ctx.failure(node, ty)),
        ParamType::Float => node
            .as_scalar()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .map(ArgValue::Float)
            .ok_or_else(|| ctx.failure(node, ty)),
        ParamType::Str => node
            .as_scalar()
            .map(|s| ArgValue::Str(s.to_string()))
            .ok_or_else(|| ctx.failure(node, ty)),
        ParamType::Level => node
            .as_scalar()
            .and_then(|s| s.parse::<Level>().ok())
            .map(ArgValue::Level)
            .ok_or_else(|| ctx.failure(node, ty)),
        ParamType::Seq(inner) => {
            let items = node.as_array().ok_or_else(|| ctx.failure(node, ty))?;
            items
                .iter()
                .map(|item| coerce(item, inner, activator, ctx))
                .collect::<Result<Vec<_>, _>>()
                .map(ArgValue::Seq)
        }
        ParamType::Component(capability) => {
            let declaration = StageDeclaration::from_node(node, ctx.stage)
                .map_err(|_| ctx.failure(node, ty))?;
            let label = format!("{}.{}", ctx.stage, ctx.parameter);
            let bound = activator
                .activate(&label, &declaration, *capability)
                .map_err(|source| BindError::Nested {
                    stage: ctx.stage.to_string(),
                    type_name: ctx.type_name.to_string(),
                    parameter: ctx.parameter.to_string(),
                    source: Box::new(source),
                })?;
            Ok(ArgValue::Component(bound.component))
        }
    }
}
