use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),

    #[error("Prompt template not found: {0}")]
    MissingTemplate(String),
}

/// How strictly service-supplied numeric and enumerated fields are checked
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Reject scores outside 0..=100 and unknown simulation verdicts
    #[default]
    Strict,
    /// Accept whatever the service returned and display it as-is
    Lenient,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    /// API key for the generation service
    pub api_key: Option<String>,

    /// Base endpoint of the Generative Language API
    pub api_endpoint: Option<String>,

    /// Model to use
    pub model: Option<String>,

    /// Environment variable checked first when no key is configured
    pub api_key_env: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Connection settings for the generation service
    pub llm_api: ApiConfig,

    /// Reasoning token budget granted to the model
    pub thinking_budget: Option<u32>,

    /// Transport timeout; unset means the request waits as long as the service does
    pub timeout_secs: Option<u64>,

    /// Checks applied to the parsed asset
    pub validation: ValidationPolicy,

    /// Prompt templates (`system_instruction`, `user_prompt`)
    pub prompt_templates: HashMap<String, String>,
}

/// Environment variables checked for a key, in order, after `api_key_env`
const API_KEY_ENV_VARS: [&str; 3] = ["API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"];

pub const DEFAULT_API_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_THINKING_BUDGET: u32 = 32768;

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: GeneratorConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the API key. Called once per request so a key exported after
    /// startup is picked up by the next submission.
    pub fn get_api_key(&self) -> Result<String, ConfigError> {
        use log::debug;

        if let Some(api_key) = &self.llm_api.api_key {
            debug!("Using API key from config");
            return Ok(api_key.clone());
        }

        let configured = self.llm_api.api_key_env.as_deref();
        for env_var in configured.into_iter().chain(API_KEY_ENV_VARS) {
            match std::env::var(env_var) {
                Ok(key) if !key.trim().is_empty() => {
                    debug!("Using API key from {}", env_var);
                    return Ok(key);
                }
                _ => debug!("{} not set", env_var),
            }
        }

        Err(ConfigError::MissingApiKey(format!(
            "none of {} is set",
            configured
                .into_iter()
                .chain(API_KEY_ENV_VARS)
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }

    pub fn endpoint(&self) -> &str {
        self.llm_api.api_endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT)
    }

    pub fn model(&self) -> &str {
        self.llm_api.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Get the template for a specific task
    pub fn get_template(&self, template_name: &str) -> Option<String> {
        self.prompt_templates.get(template_name).cloned()
    }
}

/// Default configuration
impl Default for GeneratorConfig {
    fn default() -> Self {
        let mut prompt_templates = HashMap::new();
        prompt_templates.insert(
            "system_instruction".to_string(),
            r#"You are a world-class Senior Automotive Systems Architect and Safety Engineer (ISO 26262 expert).
Your specialty is Software-Defined Vehicles (SDV) and Service-Oriented Architectures (SoA).

When generating content:
1. Adhere strictly to ISO 26262 ASIL-D requirements.
2. For C++, follow MISRA C++:2023 and AUTOSAR Adaptive guidelines (ara::com).
3. For Rust, utilize safety-critical patterns and the 'no_std' environment where applicable for embedded targets.
4. Architecture should assume a modern middleware like Zenoh, DDS, or SOME/IP.
5. UML diagrams must be syntactically perfect Mermaid.js code.
6. Requirements must follow the EARS (Easy Approach to Requirements Syntax) patterns.

Reason deeply about the safety implications, potential race conditions in distributed vehicle services, and memory safety before providing the final architecture and code."#.to_string(),
        );
        prompt_templates.insert(
            "user_prompt".to_string(),
            r#"Generate a comprehensive automotive SoA asset bundle for: "{{prompt}}""#.to_string(),
        );

        GeneratorConfig {
            llm_api: ApiConfig {
                api_key: None,
                api_endpoint: Some(DEFAULT_API_ENDPOINT.to_string()),
                model: Some(DEFAULT_MODEL.to_string()),
                api_key_env: None,
            },
            thinking_budget: Some(DEFAULT_THINKING_BUDGET),
            timeout_secs: None,
            validation: ValidationPolicy::Strict,
            prompt_templates,
        }
    }
}
