use std::collections::HashMap;
use async_trait::async_trait;
use log::{debug, error, info, warn};
use serde_json::Value;

use crate::errors::{GenerationError, GenerationResult};
use crate::implementations::config::{ConfigError, GeneratorConfig, ValidationPolicy};
use crate::implementations::gemini_backend::GeminiBackend;
use crate::implementations::schema::asset_response_schema;
use crate::models::asset::{GeneratedAsset, SimStatus};
use crate::traits::asset_generator::AssetGenerator;
use crate::traits::model_backend::{GenerationRequest, ModelBackend};

/// Implementation of the AssetGenerator trait on top of a hosted model.
///
/// Each call renders the prompt templates, sends exactly one request through
/// the backend and normalizes the reply into a [`GeneratedAsset`]. Nothing is
/// cached between calls.
///
/// # Usage Example
/// ```rust,no_run
/// use autocodegen::{AssetGenerator, GeneratorConfig, LLMAssetGenerator};
///
/// async fn generate_example() -> Result<(), Box<dyn std::error::Error>> {
///     let generator = LLMAssetGenerator::gemini(GeneratorConfig::default())?;
///     let asset = generator.generate("Lane Keep Assist with steer-by-wire").await?;
///     println!("Compliance score: {}", asset.compliance_score);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct LLMAssetGenerator<B: ModelBackend> {
    config: GeneratorConfig,
    backend: B,
}

impl LLMAssetGenerator<GeminiBackend> {
    /// Create a generator talking to the Generative Language API
    pub fn gemini(config: GeneratorConfig) -> GenerationResult<Self> {
        let backend = GeminiBackend::new(config.clone())?;
        Ok(Self::new(config, backend))
    }
}

impl<B: ModelBackend> LLMAssetGenerator<B> {
    pub fn new(config: GeneratorConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Render a template with the given parameters
    fn render_template(
        &self,
        template_name: &str,
        params: &HashMap<String, String>
    ) -> GenerationResult<String> {
        let template = self.config
            .get_template(template_name)
            .or_else(|| GeneratorConfig::default().get_template(template_name))
            .ok_or_else(|| ConfigError::MissingTemplate(template_name.to_string()))?;

        let mut result = template;
        for (key, value) in params {
            let placeholder = format!("{{{{{}}}}}", key);
            result = result.replace(&placeholder, value);
        }

        Ok(result)
    }

    /// Build the request sent to the backend for a prompt
    pub fn build_request(&self, prompt: &str) -> GenerationResult<GenerationRequest> {
        let mut params = HashMap::new();
        params.insert("prompt".to_string(), prompt.to_string());

        Ok(GenerationRequest {
            system_instruction: self.render_template("system_instruction", &HashMap::new())?,
            user_prompt: self.render_template("user_prompt", &params)?,
            response_schema: asset_response_schema(),
            thinking_budget: self.config.thinking_budget,
        })
    }
}

#[async_trait]
impl<B: ModelBackend> AssetGenerator for LLMAssetGenerator<B> {
    async fn generate(&self, prompt: &str) -> GenerationResult<GeneratedAsset> {
        info!("Generating asset bundle via {}", self.backend.name());
        debug!("Prompt: {}", truncate(prompt, 100));

        let request = self.build_request(prompt)?;
        let result = match self.backend.complete(&request).await {
            Ok(text) => parse_asset(&text, self.config.validation),
            Err(e) => Err(e),
        };

        match &result {
            Ok(asset) => info!(
                "Asset bundle received: {} requirements, {} test cases, score {}",
                asset.requirements.len(),
                asset.test_cases.len(),
                asset.compliance_score
            ),
            Err(e) => error!("Generation failed: {}", e),
        }
        result
    }
}

/// Remove a surrounding markdown code fence (```` ```json ```` … ```` ``` ````)
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```json").or_else(|| body.strip_prefix("```")) {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Clean, parse and validate raw response text into an asset bundle
pub fn parse_asset(raw: &str, policy: ValidationPolicy) -> GenerationResult<GeneratedAsset> {
    let cleaned = strip_code_fence(raw);
    if cleaned.is_empty() {
        warn!("Generation service returned an empty response");
        return Err(GenerationError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(cleaned).map_err(|e| {
        warn!("Response is not valid JSON: {}", e);
        GenerationError::MalformedResponse(e.to_string())
    })?;

    if !value.is_object() {
        return Err(GenerationError::MalformedResponse("expected a JSON object".to_string()));
    }

    if !is_present(&value["sourceCode"]) || !is_present(&value["classDiagram"]) {
        warn!("Response lacks sourceCode or classDiagram");
        return Err(GenerationError::IncompleteAsset);
    }

    let asset: GeneratedAsset = serde_json::from_value(value)?;
    validate_asset(&asset, policy)?;
    Ok(asset)
}

/// Range and enum checks on service-supplied values
pub fn validate_asset(asset: &GeneratedAsset, policy: ValidationPolicy) -> GenerationResult<()> {
    if policy == ValidationPolicy::Lenient {
        return Ok(());
    }

    let score = asset.compliance_score;
    if !score.is_finite() || !(0.0..=100.0).contains(&score) {
        return Err(GenerationError::InvalidAsset(format!(
            "complianceScore {} is outside 0..=100",
            score
        )));
    }

    if asset.sim_data.status == SimStatus::Unknown {
        return Err(GenerationError::InvalidAsset(
            "simData.status must be 'success' or 'failure'".to_string(),
        ));
    }

    Ok(())
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
