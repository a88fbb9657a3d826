// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod node;

pub use loader::{MinimumLevel, PipelineConfig};
pub use node::{ConfigNode, StageDeclaration};
