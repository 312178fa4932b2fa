//! Configuration type definitions and defaults

use serde::Deserialize;

use crate::error::MinifyError;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub rename: RenameConfig,
}

/// Which pipeline stages run
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_enabled")]
    pub strip_comments: bool,
    #[serde(default = "default_enabled")]
    pub rename_variables: bool,
    #[serde(default = "default_enabled")]
    pub compact_spacing: bool,
    #[serde(default = "default_enabled")]
    pub join_lines: bool,
}

pub fn default_enabled() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            strip_comments: default_enabled(),
            rename_variables: default_enabled(),
            compact_spacing: default_enabled(),
            join_lines: default_enabled(),
        }
    }
}

/// Variable renaming configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenameConfig {
    /// Variables that must keep their name on top of PowerShell's own
    /// (e.g. globals shared with other scripts). Case-insensitive.
    #[serde(default)]
    pub extra_reserved: Vec<String>,
}

impl RenameConfig {
    /// Check that every extra reserved name is a variable reference.
    pub fn validate(&self) -> Result<(), MinifyError> {
        match self.extra_reserved.iter().find(|name| !is_variable_name(name)) {
            Some(name) => Err(MinifyError::InvalidReserved(name.clone())),
            None => Ok(()),
        }
    }
}

fn is_variable_name(name: &str) -> bool {
    name.strip_prefix('$').is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}
