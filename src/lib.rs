// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! # pipewright
//!
//! A configuration-driven component resolution and argument-binding engine
//! for log pipelines. A declared configuration (JSON or YAML) names pipeline
//! stages by type; pipewright resolves each name against registered provider
//! modules, selects a construction overload from the supplied argument
//! names, coerces the raw values, and assembles a runnable pipeline.
//!
//! ## Example
//!
//! ```
//! use pipewright::config::PipelineConfig;
//! use pipewright::events::{Level, LogEvent};
//! use pipewright::pipeline::PipelineBuilder;
//! use pipewright::providers::core::register_core;
//! use pipewright::resolve::ModuleSet;
//!
//! let modules = ModuleSet::new();
//! register_core(&modules);
//!
//! let config = PipelineConfig::from_json_str(
//!     r#"{
//!         "MinimumLevel": "Debug",
//!         "Filter": [{"Name": "LevelRangeFilter", "Args": {"levelFilter": "Information"}}],
//!         "WriteTo": ["ConsoleSink"]
//!     }"#,
//! ).unwrap();
//!
//! let pipeline = PipelineBuilder::new(&modules).build(&config).unwrap();
//! pipeline.emit(&mut LogEvent::new(Level::Information, "ready"));
//! ```

pub mod config; // Configuration parsing and shaping
pub mod errors; // Error types for binding and configuration
pub mod events; // Log event model and level switches
pub mod observability; // Structured logging messages
pub mod pipeline; // Pipeline building and execution
pub mod providers; // Built-in provider modules
pub mod resolve; // Type resolution, overload selection, activation
pub mod traits; // Capability contracts for pipeline stages
