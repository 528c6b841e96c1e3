//! Configuration settings for entitygen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{GenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Root directory of the target Java project
    #[serde(default)]
    pub project_dir: PathBuf,

    /// Source root relative to each module directory
    #[serde(default = "default_source_root")]
    pub source_root: String,

    /// Entity classes to include (comma-separated simple names, or "*" for all)
    #[serde(default = "default_include_classes")]
    pub include_classes: String,

    /// Entity classes to exclude (comma-separated simple names)
    #[serde(default = "default_exclude_classes")]
    pub exclude_classes: String,

    /// Whether to generate the entity, query-parameter and list classes
    #[serde(default = "default_generate_dto")]
    pub generate_dto: bool,

    /// Whether to generate the DAO interface/implementation and the mapper XML
    #[serde(default = "default_generate_dao")]
    pub generate_dao: bool,

    /// Whether to generate the base service interface/implementation
    #[serde(default = "default_generate_service")]
    pub generate_service: bool,

    /// Module to generate into when an annotation names an unknown module.
    /// Defaults to the module containing the annotated class.
    #[serde(default)]
    pub output_module: Option<String>,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_source_root() -> String {
    defaults::SOURCE_ROOT.to_string()
}
fn default_include_classes() -> String {
    defaults::INCLUDE_CLASSES.to_string()
}
fn default_exclude_classes() -> String {
    defaults::EXCLUDE_CLASSES.to_string()
}
fn default_generate_dto() -> bool {
    defaults::GENERATE_DTO
}
fn default_generate_dao() -> bool {
    defaults::GENERATE_DAO
}
fn default_generate_service() -> bool {
    defaults::GENERATE_SERVICE
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::new(),
            source_root: default_source_root(),
            include_classes: default_include_classes(),
            exclude_classes: default_exclude_classes(),
            generate_dto: default_generate_dto(),
            generate_dao: default_generate_dao(),
            generate_service: default_generate_service(),
            output_module: None,
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl GenConfig {
    /// Create a default config rooted at the given project directory
    pub fn default_with_project(project_dir: PathBuf) -> Self {
        Self {
            project_dir,
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GenConfig = toml::from_str(&content).map_err(|e| {
            GenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name("entitygen").required(false));
        }

        // Override with environment variables (ENTITYGEN_*)
        builder = builder.add_source(Environment::with_prefix("ENTITYGEN").separator("_"));

        let config: GenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.project_dir.as_os_str().is_empty() {
            return Err(GenError::ValidationError("project_dir is required".into()));
        }

        if !self.project_dir.is_dir() {
            return Err(GenError::ValidationError(format!(
                "Project directory not found: {}",
                self.project_dir.display()
            )));
        }

        if self.source_root.trim().is_empty() {
            return Err(GenError::ValidationError("source_root is required".into()));
        }

        if !self.generate_dto && !self.generate_dao && !self.generate_service {
            return Err(GenError::ValidationError(
                "nothing to generate: enable at least one of generate_dto, generate_dao, generate_service".into(),
            ));
        }

        Ok(())
    }
}
