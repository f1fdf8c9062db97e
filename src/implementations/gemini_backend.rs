use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::{json, Value};

use crate::errors::{GenerationError, GenerationResult};
use crate::implementations::config::GeneratorConfig;
use crate::traits::model_backend::{GenerationRequest, ModelBackend};

/// Backend for the Generative Language REST API (`models/*:generateContent`).
///
/// # API Keys
/// The key is resolved on every call, in this order:
///
/// 1. `api_key` in the configuration
/// 2. the variable named by `api_key_env`, if set
/// 3. `API_KEY`, `GEMINI_API_KEY`, `GOOGLE_API_KEY`
#[derive(Clone)]
pub struct GeminiBackend {
    config: GeneratorConfig,
    http_client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(config: GeneratorConfig) -> GenerationResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| GenerationError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http_client })
    }

    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint().trim_end_matches('/'),
            self.config.model()
        )
    }
}

/// Build the `generateContent` request body
pub fn build_request_body(request: &GenerationRequest) -> Value {
    let mut generation_config = json!({
        "responseMimeType": "application/json",
        "responseSchema": request.response_schema,
    });
    if let Some(budget) = request.thinking_budget {
        generation_config["thinkingConfig"] = json!({ "thinkingBudget": budget });
    }

    json!({
        "systemInstruction": {
            "parts": [{ "text": request.system_instruction }]
        },
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": request.user_prompt }]
            }
        ],
        "generationConfig": generation_config,
    })
}

/// Concatenate the text parts of the first candidate, skipping reasoning
/// ("thought") parts. A response without candidates yields an empty string.
pub fn extract_response_text(response: &Value) -> String {
    let parts = response["candidates"]
        .as_array()
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate["content"]["parts"].as_array());

    let Some(parts) = parts else {
        if let Some(reason) = response["promptFeedback"]["blockReason"].as_str() {
            warn!("Prompt blocked by the service: {}", reason);
        }
        return String::new();
    };

    parts
        .iter()
        .filter(|part| !part["thought"].as_bool().unwrap_or(false))
        .filter_map(|part| part["text"].as_str())
        .collect()
}

/// Map a non-success HTTP reply onto the error taxonomy
pub fn classify_http_error(status: u16, body: &str) -> GenerationError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let service_status = parsed
        .as_ref()
        .and_then(|v| v["error"]["status"].as_str())
        .unwrap_or_default();
    let message = parsed
        .as_ref()
        .and_then(|v| v["error"]["message"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());

    if status == 429 || service_status == "RESOURCE_EXHAUSTED" || message.contains("429") {
        return GenerationError::RateLimited;
    }

    GenerationError::Service {
        status,
        message: if message.is_empty() { "no error message".to_string() } else { message },
    }
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    async fn complete(&self, request: &GenerationRequest) -> GenerationResult<String> {
        let api_key = self.config.get_api_key().map_err(|e| {
            warn!("API key error: {}", e);
            GenerationError::Config(e)
        })?;

        let url = self.endpoint_url();
        let body = build_request_body(request);

        info!("Making generation request to {}", self.config.model());
        debug!("API endpoint: {}", url);
        debug!("Thinking budget: {:?}", request.thinking_budget);
        debug!("Prompt length: {} characters", request.user_prompt.len());

        let response = self.http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &api_key)
            .json(&body)
            .send().await
            .map_err(|e| {
                let error_msg = format!("Network error when calling generation API: {}", e);
                warn!("{}", error_msg);
                if e.is_timeout() {
                    warn!("Request timed out");
                }
                if e.is_connect() {
                    warn!("Connection error - check network connectivity");
                }
                GenerationError::Network(error_msg)
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("API error: HTTP {} - {}", status, error_text);
            return Err(classify_http_error(status, &error_text));
        }

        let response_text = response.text().await.map_err(|e| {
            warn!("Failed to get response text: {}", e);
            GenerationError::Network(e.to_string())
        })?;

        if response_text.trim().is_empty() {
            return Ok(String::new());
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
            warn!("Response envelope is not JSON: {}", e);
            GenerationError::MalformedResponse(format!("invalid response envelope: {}", e))
        })?;

        let content = extract_response_text(&response_json);
        info!("Received response from generation API");
        debug!("Content length: {} characters", content.len());

        Ok(content)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
