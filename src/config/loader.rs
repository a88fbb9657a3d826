// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::Path;

use crate::config::node::{ConfigNode, StageDeclaration};
use crate::errors::ConfigError;
use crate::events::Level;

/// Minimum-level configuration: a default plus per-source-context overrides.
///
/// Overrides map a dotted source-context prefix (e.g. `Microsoft`) to a
/// level; at emit time the longest matching prefix wins.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimumLevel {
    pub default: Level,
    pub overrides: Vec<(String, Level)>,
}

impl Default for MinimumLevel {
    fn default() -> Self {
        Self {
            default: Level::Information,
            overrides: Vec::new(),
        }
    }
}

/// The full declared pipeline configuration, shaped but not yet bound.
///
/// This is the typed view of the configuration tree the binder consumes:
/// `{MinimumLevel, FilterSwitch, Enrich, Filter, WriteTo, Destructure}`.
/// Stage arguments stay as raw config nodes; coercion happens during
/// activation. Unknown top-level keys are tolerated and ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    pub minimum_level: MinimumLevel,
    /// Expression for the optional filter switch capability, if declared.
    pub filter_switch: Option<String>,
    pub enrich: Vec<StageDeclaration>,
    pub filter: Vec<StageDeclaration>,
    pub write_to: Vec<StageDeclaration>,
    pub destructure: Vec<StageDeclaration>,
}

impl PipelineConfig {
    /// Shape a pipeline configuration from a parsed config tree.
    pub fn from_node(root: &ConfigNode) -> Result<Self, ConfigError> {
        if root.as_object().is_none() {
            return Err(ConfigError::InvalidShape {
                section: "root".to_string(),
                reason: "pipeline configuration must be an object".to_string(),
            });
        }

        let minimum_level = match root.get("MinimumLevel") {
            None => MinimumLevel::default(),
            Some(node) => parse_minimum_level(node)?,
        };

        let filter_switch = match root.get("FilterSwitch") {
            None => None,
            Some(node) => Some(
                node.as_scalar()
                    .ok_or_else(|| ConfigError::InvalidShape {
                        section: "FilterSwitch".to_string(),
                        reason: "expression must be a scalar string".to_string(),
                    })?
                    .to_string(),
            ),
        };

        Ok(Self {
            minimum_level,
            filter_switch,
            enrich: parse_stage_list(root.get("Enrich"), "Enrich")?,
            filter: parse_stage_list(root.get("Filter"), "Filter")?,
            write_to: parse_stage_list(root.get("WriteTo"), "WriteTo")?,
            destructure: parse_stage_list(root.get("Destructure"), "Destructure")?,
        })
    }

    /// Parse a pipeline configuration from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Self::from_node(&ConfigNode::from_json(&value))
    }

    /// Parse a pipeline configuration from a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        Self::from_node(&ConfigNode::from_yaml(&value)?)
    }

    /// Load a pipeline configuration from a file, dispatching on extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

fn parse_level(literal: &str) -> Result<Level, ConfigError> {
    literal.parse().map_err(|_| ConfigError::UnknownLevel {
        literal: literal.to_string(),
    })
}

fn parse_minimum_level(node: &ConfigNode) -> Result<MinimumLevel, ConfigError> {
    match node {
        ConfigNode::Scalar(literal) => Ok(MinimumLevel {
            default: parse_level(literal)?,
            overrides: Vec::new(),
        }),
        ConfigNode::Object(_) => {
            let default = match node.get("Default") {
                None => Level::Information,
                Some(child) => parse_level(child.as_scalar().ok_or_else(|| {
                    ConfigError::InvalidShape {
                        section: "MinimumLevel".to_string(),
                        reason: "'Default' must be a level name".to_string(),
                    }
                })?)?,
            };

            let mut overrides = Vec::new();
            if let Some(override_node) = node.get("Override") {
                let map = override_node
                    .as_object()
                    .ok_or_else(|| ConfigError::InvalidShape {
                        section: "MinimumLevel".to_string(),
                        reason: "'Override' must map source-context prefixes to level names"
                            .to_string(),
                    })?;
                for (prefix, child) in map {
                    let literal =
                        child
                            .as_scalar()
                            .ok_or_else(|| ConfigError::InvalidShape {
                                section: "MinimumLevel".to_string(),
                                reason: format!("override for '{}' must be a level name", prefix),
                            })?;
                    overrides.push((prefix.clone(), parse_level(literal)?));
                }
            }

            Ok(MinimumLevel { default, overrides })
        }
        ConfigNode::Array(_) => Err(ConfigError::InvalidShape {
            section: "MinimumLevel".to_string(),
            reason: "expected a level name or an object with 'Default'/'Override'".to_string(),
        }),
    }
}

fn parse_stage_list(
    node: Option<&ConfigNode>,
    section: &str,
) -> Result<Vec<StageDeclaration>, ConfigError> {
    match node {
        None => Ok(Vec::new()),
        Some(ConfigNode::Array(items)) => items
            .iter()
            .map(|item| StageDeclaration::from_node(item, section))
            .collect(),
        // A lone stage is accepted as a one-element list.
        Some(single) => Ok(vec![StageDeclaration::from_node(single, section)?]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"
    {
        "MinimumLevel": {
            "Default": "Debug",
            "Override": {
                "Microsoft": "Warning",
                "MyApp.Something.Tricky": "Verbose"
            }
        },
        "FilterSwitch": "Level >= Information",
        "Enrich": [
            {"Name": "PropertyEnricher", "Args": {"name": "App", "value": "Sample"}}
        ],
        "Filter": [
            {"Name": "LevelRangeFilter", "Args": {"levelFilter": "Information"}}
        ],
        "WriteTo": [
            "ConsoleSink",
            {"Name": "ConsoleSink", "Args": {"formatter": {"Name": "MessageOnlyFormatter"}}}
        ],
        "Destructure": [
            {"Name": "StripPropertyPolicy", "Args": {"name": "Password"}}
        ]
    }"#;

    #[test]
    fn test_parse_full_json_configuration() {
        let config = PipelineConfig::from_json_str(SAMPLE_JSON).unwrap();

        assert_eq!(config.minimum_level.default, Level::Debug);
        assert_eq!(
            config.minimum_level.overrides,
            vec![
                ("Microsoft".to_string(), Level::Warning),
                ("MyApp.Something.Tricky".to_string(), Level::Verbose),
            ]
        );
        assert_eq!(config.filter_switch.as_deref(), Some("Level >= Information"));
        assert_eq!(config.enrich.len(), 1);
        assert_eq!(config.filter.len(), 1);
        assert_eq!(config.write_to.len(), 2);
        assert_eq!(config.write_to[0].name, "ConsoleSink");
        assert!(config.write_to[0].args.is_empty());
        assert_eq!(config.destructure.len(), 1);
    }

    #[test]
    fn test_parse_yaml_configuration() {
        let yaml = r#"
MinimumLevel: Warning
WriteTo:
  - Name: ConsoleSink
Filter:
  - Name: LevelRangeFilter
    Args:
      min: Warning
      max: Error
"#;
        let config = PipelineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.minimum_level.default, Level::Warning);
        assert!(config.minimum_level.overrides.is_empty());
        assert_eq!(config.write_to.len(), 1);
        assert_eq!(config.filter[0].args.len(), 2);
    }

    #[test]
    fn test_defaults_for_missing_sections() {
        let config = PipelineConfig::from_json_str("{}").unwrap();
        assert_eq!(config.minimum_level.default, Level::Information);
        assert!(config.filter_switch.is_none());
        assert!(config.enrich.is_empty());
        assert!(config.write_to.is_empty());
    }

    #[test]
    fn test_unknown_top_level_keys_are_ignored() {
        let config =
            PipelineConfig::from_json_str(r#"{"AuditTo": [], "MinimumLevel": "Error"}"#).unwrap();
        assert_eq!(config.minimum_level.default, Level::Error);
    }

    #[test]
    fn test_unknown_level_is_reported_with_literal() {
        let err = PipelineConfig::from_json_str(r#"{"MinimumLevel": "Loud"}"#).unwrap_err();
        assert!(err.to_string().contains("'Loud'"), "got: {}", err);
    }

    #[test]
    fn test_single_stage_object_accepted_as_list() {
        let config = PipelineConfig::from_json_str(
            r#"{"WriteTo": {"Name": "ConsoleSink"}}"#,
        )
        .unwrap();
        assert_eq!(config.write_to.len(), 1);
        assert_eq!(config.write_to[0].name, "ConsoleSink");
    }

    #[test]
    fn test_load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("pipeline.json");
        std::fs::write(&json_path, r#"{"MinimumLevel": "Error"}"#).unwrap();
        let config = PipelineConfig::load(&json_path).unwrap();
        assert_eq!(config.minimum_level.default, Level::Error);

        let yaml_path = dir.path().join("pipeline.yaml");
        std::fs::write(&yaml_path, "MinimumLevel: Debug\n").unwrap();
        let config = PipelineConfig::load(&yaml_path).unwrap();
        assert_eq!(config.minimum_level.default, Level::Debug);

        let other_path = dir.path().join("pipeline.toml");
        std::fs::write(&other_path, "x = 1\n").unwrap();
        let err = PipelineConfig::load(&other_path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }
}
