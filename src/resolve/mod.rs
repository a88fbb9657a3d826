// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod activator;
mod coerce;
mod module_set;
mod overload;
mod resolver;
mod schema;

pub use activator::{Activator, BoundComponent};
pub use module_set::{ModuleSet, ProviderModule};
pub use overload::{select_path, Selection, SelectionFailure};
pub use resolver::{resolve_type, Resolution};
pub use schema::{ArgValue, BoundArgs, BuildFn, ConstructionPath, ParamSpec, ParamType, TypeSchema};
