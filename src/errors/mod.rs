// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod bind;
mod config;

pub use bind::{BindError, FactoryError};
pub use config::ConfigError;
