use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::implementations::config::{ConfigError, GeneratorConfig};

/// Configuration for the AutoCodeGen front-end
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoCodeGenConfig {
    pub generator: GeneratorConfig,
    pub workflow: WorkflowOptions,
}

/// Options for the workflow controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowOptions {
    /// Pause after each cosmetic pipeline stage, in milliseconds
    pub step_interval_ms: u64,
}

impl WorkflowOptions {
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self { step_interval_ms: 600 }
    }
}

impl AutoCodeGenConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}
