// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Construction path selection.
//!
//! Candidate paths are those whose required parameters are all satisfiable
//! from the configured argument names (plus any implicit names the pipeline
//! always supplies). Among candidates, the path satisfying the most
//! parameters from explicit configuration wins; ties go to the path declared
//! first on the type. The choice for a given (type, argument-name-set) pair
//! is deterministic and reproducible.
//!
//! Parameter-name matching is case-insensitive, mirroring configuration key
//! lookup. Surplus configured arguments never disqualify a path; they are
//! ignored and only surface in the no-match diagnostic.

use super::schema::{ConstructionPath, TypeSchema};

/// A successful overload choice.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub path: &'a ConstructionPath,
    pub index: usize,
    /// How many parameters were satisfied by explicit configuration.
    pub satisfied: usize,
}

/// No construction path survived. Carries the best near-miss diagnostic:
/// the required names the closest path is missing and the configured names
/// it does not accept.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionFailure {
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

/// Pick the construction path for `schema` given the configured argument
/// names and any implicit names the caller always supplies.
pub fn select_path<'a>(
    schema: &'a TypeSchema,
    provided: &[String],
    implicit: &[&str],
) -> Result<Selection<'a>, SelectionFailure> {
    let mut best: Option<Selection<'a>> = None;

    for (index, path) in schema.paths.iter().enumerate() {
        let required_satisfiable = path
            .required_params()
            .all(|p| contains_fold(provided, &p.name) || implicit_contains(implicit, &p.name));
        if !required_satisfiable {
            continue;
        }

        let satisfied = path
            .params
            .iter()
            .filter(|p| contains_fold(provided, &p.name))
            .count();

        // Strict improvement only, so the earliest declared path wins ties.
        let improves = match &best {
            None => true,
            Some(current) => satisfied > current.satisfied,
        };
        if improves {
            best = Some(Selection {
                path,
                index,
                satisfied,
            });
        }
    }

    best.ok_or_else(|| near_miss(schema, provided, implicit))
}

fn contains_fold(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n.eq_ignore_ascii_case(name))
}

fn implicit_contains(implicit: &[&str], name: &str) -> bool {
    implicit.iter().any(|n| n.eq_ignore_ascii_case(name))
}

/// Build the diagnostic for a failed selection from the path with the
/// fewest missing required parameters (declaration order breaks ties).
fn near_miss(schema: &TypeSchema, provided: &[String], implicit: &[&str]) -> SelectionFailure {
    let mut best: Option<SelectionFailure> = None;

    for path in &schema.paths {
        let missing: Vec<String> = path
            .required_params()
            .filter(|p| !contains_fold(provided, &p.name) && !implicit_contains(implicit, &p.name))
            .map(|p| p.name.clone())
            .collect();

        let unexpected: Vec<String> = provided
            .iter()
            .filter(|name| !path.params.iter().any(|p| p.name.eq_ignore_ascii_case(name)))
            .cloned()
            .collect();

        let candidate = SelectionFailure {
            missing,
            unexpected,
        };
        let improves = match &best {
            None => true,
            Some(current) => candidate.missing.len() < current.missing.len(),
        };
        if improves {
            best = Some(candidate);
        }
    }

    best.unwrap_or(SelectionFailure {
        missing: Vec::new(),
        unexpected: provided.to_vec(),
    })
}
