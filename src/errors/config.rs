// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors that can occur while reading or shaping pipeline configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File I/O error while reading a configuration file.
    #[error("I/O error reading configuration: {0}")]
    Io(#[from] std::io::Error),

    /// JSON syntax error in a configuration document.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML syntax error in a configuration document.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration file extension is neither JSON nor YAML.
    #[error("Unsupported configuration format: '{path}' (expected .json, .yaml, or .yml)")]
    UnsupportedFormat { path: String },

    /// A configuration section has the wrong structural shape.
    #[error("Invalid configuration shape in '{section}': {reason}")]
    InvalidShape { section: String, reason: String },

    /// A stage declaration object carries no `Name` key.
    #[error("Stage declaration in '{section}' is missing a 'Name' key")]
    MissingStageName { section: String },

    /// A level literal does not name a known level.
    #[error("'{literal}' is not a recognized level name")]
    UnknownLevel { literal: String },
}
