// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use indexmap::IndexMap;

use crate::errors::ConfigError;

/// An ordered, string-keyed configuration tree node.
///
/// Leaves hold scalar strings; branches hold children addressed by key
/// (object) or by position (array). Scalars are always strings at this
/// level — numbers and booleans from the source document normalize to their
/// canonical literal form, and typing happens later during value coercion.
///
/// Nodes are immutable once parsed; the binder only reads them.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
    Scalar(String),
    Object(IndexMap<String, ConfigNode>),
    Array(Vec<ConfigNode>),
}

impl ConfigNode {
    pub fn scalar(value: impl Into<String>) -> Self {
        ConfigNode::Scalar(value.into())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ConfigNode::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, ConfigNode>> {
        match self {
            ConfigNode::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ConfigNode]> {
        match self {
            ConfigNode::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a child by key: exact match first, then case-insensitive.
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        let map = self.as_object()?;
        map.get(key).or_else(|| {
            map.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }

    /// Short description of the node for diagnostics: the literal for
    /// scalars, a shape marker for branches.
    pub fn describe(&self) -> String {
        match self {
            ConfigNode::Scalar(s) => s.clone(),
            ConfigNode::Object(_) => "<object>".to_string(),
            ConfigNode::Array(_) => "<array>".to_string(),
        }
    }

    /// Convert an already-parsed JSON document into a config tree.
    ///
    /// JSON nulls become empty scalars; numbers and booleans keep their
    /// canonical literal form. Key order is preserved (`preserve_order`).
    pub fn from_json(value: &serde_json::Value) -> ConfigNode {
        match value {
            serde_json::Value::Null => ConfigNode::Scalar(String::new()),
            serde_json::Value::Bool(b) => ConfigNode::Scalar(b.to_string()),
            serde_json::Value::Number(n) => ConfigNode::Scalar(n.to_string()),
            serde_json::Value::String(s) => ConfigNode::Scalar(s.clone()),
            serde_json::Value::Array(items) => {
                ConfigNode::Array(items.iter().map(ConfigNode::from_json).collect())
            }
            serde_json::Value::Object(map) => ConfigNode::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), ConfigNode::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert an already-parsed YAML document into a config tree.
    ///
    /// YAML mappings must use string keys; anything else is a shape error.
    pub fn from_yaml(value: &serde_yaml::Value) -> Result<ConfigNode, ConfigError> {
        match value {
            serde_yaml::Value::Null => Ok(ConfigNode::Scalar(String::new())),
            serde_yaml::Value::Bool(b) => Ok(ConfigNode::Scalar(b.to_string())),
            serde_yaml::Value::Number(n) => Ok(ConfigNode::Scalar(n.to_string())),
            serde_yaml::Value::String(s) => Ok(ConfigNode::Scalar(s.clone())),
            serde_yaml::Value::Sequence(items) => Ok(ConfigNode::Array(
                items
                    .iter()
                    .map(ConfigNode::from_yaml)
                    .collect::<Result<_, _>>()?,
            )),
            serde_yaml::Value::Mapping(map) => {
                let mut object = IndexMap::with_capacity(map.len());
                for (key, child) in map {
                    let key = key
                        .as_str()
                        .ok_or_else(|| ConfigError::InvalidShape {
                            section: "mapping".to_string(),
                            reason: "mapping keys must be strings".to_string(),
                        })?
                        .to_string();
                    object.insert(key, ConfigNode::from_yaml(child)?);
                }
                Ok(ConfigNode::Object(object))
            }
            serde_yaml::Value::Tagged(tagged) => ConfigNode::from_yaml(&tagged.value),
        }
    }
}

/// One declared pipeline stage: a type reference plus named arguments.
///
/// Parsed from `{Name: "...", Args: {...}}` objects; a bare scalar is
/// shorthand for a stage with no arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct StageDeclaration {
    pub name: String,
    pub args: IndexMap<String, ConfigNode>,
}

impl StageDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: IndexMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: ConfigNode) -> Self {
        self.args.insert(key.into(), value);
        self
    }

    /// Parse a stage declaration from a config node.
    ///
    /// `section` is only used for error attribution.
    pub fn from_node(node: &ConfigNode, section: &str) -> Result<Self, ConfigError> {
        match node {
            ConfigNode::Scalar(name) if !name.is_empty() => Ok(StageDeclaration::new(name)),
            ConfigNode::Scalar(_) => Err(ConfigError::MissingStageName {
                section: section.to_string(),
            }),
            ConfigNode::Object(_) => {
                let name = node
                    .get("Name")
                    .and_then(ConfigNode::as_scalar)
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| ConfigError::MissingStageName {
                        section: section.to_string(),
                    })?
                    .to_string();

                let args = match node.get("Args") {
                    None => IndexMap::new(),
                    Some(args_node) => args_node
                        .as_object()
                        .cloned()
                        .ok_or_else(|| ConfigError::InvalidShape {
                            section: section.to_string(),
                            reason: format!("'Args' of stage '{}' must be an object", name),
                        })?,
                };

                Ok(Self { name, args })
            }
            ConfigNode::Array(_) => Err(ConfigError::InvalidShape {
                section: section.to_string(),
                reason: "a stage must be an object or a type name, not an array".to_string(),
            }),
        }
    }
}
