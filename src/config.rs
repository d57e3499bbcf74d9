//! Configuration management for the schema tools
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (r3xa.toml)
//! - Environment variables (R3XA__*)
//!
//! ## Example config file (r3xa.toml):
//! ```toml
//! [paths]
//! schema_full = "schema-full.json"
//! schema_runtime = "schema.json"
//! specification = "docs/specification.md"
//!
//! [strip]
//! keys = ["$comment", "examples", "rationale", "see", "notes"]
//!
//! [render]
//! title = "R3XA Specification"
//! command = "make generate-spec"
//! strict = false
//! linked_types = ["unit", "uint"]
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SchemaError};

/// Keywords the renderer and validators depend on. Never strippable.
pub const STRUCTURAL_KEYS: &[&str] = &[
    "type", "properties", "required", "const", "enum", "$ref", "$defs",
    "items", "anyOf", "oneOf", "allOf",
];

/// Main configuration for the schema tools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Default input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Key stripper settings
    #[serde(default)]
    pub strip: StripConfig,

    /// Specification renderer settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Default file locations, used when a CLI positional argument is omitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Annotated schema with editorial keys
    #[serde(default = "default_schema_full")]
    pub schema_full: PathBuf,

    /// Stripped runtime schema
    #[serde(default = "default_schema_runtime")]
    pub schema_runtime: PathBuf,

    /// Generated Markdown specification
    #[serde(default = "default_specification")]
    pub specification: PathBuf,
}

/// Key stripper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripConfig {
    /// Editorial keys removed at every depth
    #[serde(default = "default_strip_keys")]
    pub keys: Vec<String>,
}

/// Renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Document title
    #[serde(default = "default_title")]
    pub title: String,

    /// Regeneration command shown in the banner
    #[serde(default = "default_command")]
    pub command: String,

    /// Fail on sub-schemas that cannot be classified instead of printing `object`
    #[serde(default)]
    pub strict: bool,

    /// Shared types whose references link to their appendix entry
    #[serde(default = "default_linked_types")]
    pub linked_types: Vec<String>,
}

fn default_schema_full() -> PathBuf {
    PathBuf::from("schema-full.json")
}

fn default_schema_runtime() -> PathBuf {
    PathBuf::from("schema.json")
}

fn default_specification() -> PathBuf {
    PathBuf::from("docs/specification.md")
}

fn default_strip_keys() -> Vec<String> {
    ["$comment", "examples", "rationale", "see", "notes"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_title() -> String {
    "R3XA Specification".to_string()
}

fn default_command() -> String {
    "make generate-spec".to_string()
}

fn default_linked_types() -> Vec<String> {
    vec!["unit".to_string(), "uint".to_string()]
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            schema_full: default_schema_full(),
            schema_runtime: default_schema_runtime(),
            specification: default_specification(),
        }
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            keys: default_strip_keys(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            command: default_command(),
            strict: false,
            linked_types: default_linked_types(),
        }
    }
}

impl ToolsConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file on top of the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["r3xa.toml", ".r3xa.toml", "config/r3xa.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("org", "r3xa", "r3xa-schemas") {
            let xdg_config = config_dir.config_dir().join("r3xa.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // R3XA__RENDER__STRICT=true
        builder = builder.add_source(
            Environment::with_prefix("R3XA")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Reject configurations that would strip structural keywords
    pub fn validate(&self) -> Result<()> {
        let structural: Vec<&str> = self
            .strip
            .keys
            .iter()
            .map(String::as_str)
            .filter(|key| STRUCTURAL_KEYS.contains(key))
            .collect();
        if structural.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::InvalidConfig(format!(
                "strip.keys contains structural keys: {}",
                structural.join(", ")
            )))
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SchemaError::InvalidConfig(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| SchemaError::io(path, e))
    }
}
