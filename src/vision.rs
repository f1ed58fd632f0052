//! Component specs from a design screenshot, via a vision-capable chat model.
//!
//! The model is asked to describe the components it sees as JSON. Its reply is
//! free text, so the JSON is recovered with
//! [`parse_json_from_response`](crate::recovery::parse_json_from_response) and
//! then annotated with provenance metadata.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::config::VisionSettings;
use crate::error::{DtxError, Result};
use crate::image_loader::ScreenshotImage;
use crate::recovery::parse_json_from_response;

pub const MOCK_RESPONSE_ENV: &str = "DTX_MOCK_VISION_RESPONSE";
pub const MOCK_RESPONSE_PATH_ENV: &str = "DTX_MOCK_VISION_RESPONSE_PATH";

const USER_INSTRUCTION: &str = "Please analyze this design screenshot and generate the comprehensive JSON design system profile as specified in the system prompt.";

/// System prompt used when no prompt file is given.
pub const DEFAULT_SYSTEM_PROMPT: &str = r##"You are a senior design-systems engineer. Analyze the UI screenshot and describe every reusable component you can identify.

Respond with a single JSON object and nothing else, shaped like:
{
  "components": [
    {
      "id": "kebab-case-identifier",
      "name": "Human readable name",
      "type": "component",
      "properties": {
        "width": 120,
        "height": 40,
        "paddingLeft": 16,
        "cornerRadius": 8,
        "fills": [{"type": "SOLID", "color": "#RRGGBB"}],
        "textStyle": {"fontFamily": "Inter", "fontSize": 14, "fontWeight": 600}
      },
      "variants": {
        "State": {"type": "VARIANT", "defaultValue": "default", "variantOptions": ["default", "hover", "disabled"]}
      },
      "description": "What the component is for"
    }
  ]
}

Measure in pixels, write colors as uppercase hex, and omit properties you cannot infer."##;

/// Anything that can turn a screenshot and a system prompt into model text.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn analyze_image(&self, image: &ScreenshotImage, system_prompt: &str) -> Result<String>;

    /// Model name recorded in the output metadata.
    fn model(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct VisionClientConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl VisionClientConfig {
    /// Combine config-file settings with the environment.
    ///
    /// The API key comes from `DTX_VISION_API_KEY` or `OPENAI_API_KEY`;
    /// `DTX_VISION_ENDPOINT` and `DTX_VISION_MODEL` override the settings.
    pub fn from_settings(settings: &VisionSettings) -> Result<Self> {
        let api_key = std::env::var("DTX_VISION_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                DtxError::Config(
                    "Vision API key missing; set DTX_VISION_API_KEY or OPENAI_API_KEY".to_string(),
                )
            })?;

        let endpoint = std::env::var("DTX_VISION_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| settings.endpoint.clone());
        let model = std::env::var("DTX_VISION_MODEL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| settings.model.clone());

        Ok(Self {
            endpoint,
            api_key,
            model,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            timeout: settings.timeout,
        })
    }
}

/// OpenAI-compatible chat-completions client.
pub struct VisionClient {
    config: VisionClientConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl VisionClient {
    pub fn new(config: VisionClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DtxError::Network)?;
        Ok(Self { config, client })
    }

    fn request_body(&self, image: &ScreenshotImage, system_prompt: &str) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": USER_INSTRUCTION },
                        {
                            "type": "image_url",
                            "image_url": { "url": image.data_url(), "detail": "high" }
                        }
                    ]
                }
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature
        })
    }
}

#[async_trait]
impl ImageAnalyzer for VisionClient {
    async fn analyze_image(&self, image: &ScreenshotImage, system_prompt: &str) -> Result<String> {
        log::info!(
            "sending {} screenshot ({} bytes) to {}",
            image.mime_type(),
            image.bytes.len(),
            self.config.model
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(image, system_prompt))
            .send()
            .await
            .map_err(|e| DtxError::vision(format!("Vision API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DtxError::vision(format!(
                "Vision API returned {status}: {body}"
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| DtxError::vision(format!("Failed to parse vision response: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| DtxError::vision("No response content from vision model"))
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Returns a canned reply instead of calling a model.
#[derive(Debug, Clone)]
pub struct StaticAnalyzer {
    response: String,
    model: String,
}

impl StaticAnalyzer {
    pub fn new(response: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            model: model.into(),
        }
    }

    /// Canned reply from `DTX_MOCK_VISION_RESPONSE` (literal text) or
    /// `DTX_MOCK_VISION_RESPONSE_PATH` (file), if either is set.
    pub fn from_env(model: &str) -> Result<Option<Self>> {
        if let Ok(text) = std::env::var(MOCK_RESPONSE_ENV) {
            if !text.is_empty() {
                return Ok(Some(Self::new(text, model)));
            }
        }

        if let Ok(path) = std::env::var(MOCK_RESPONSE_PATH_ENV) {
            if !path.trim().is_empty() {
                let text = std::fs::read_to_string(PathBuf::from(path))?;
                return Ok(Some(Self::new(text, model)));
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl ImageAnalyzer for StaticAnalyzer {
    async fn analyze_image(&self, _image: &ScreenshotImage, _system_prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Ask `analyzer` for component specs and annotate the result.
///
/// The reply must contain a JSON object; anything else is a parse error that
/// carries the head of the reply. The object gains a `metadata` entry naming
/// the source, time, and model.
pub async fn analyze_screenshot(
    analyzer: &dyn ImageAnalyzer,
    image: &ScreenshotImage,
    system_prompt: &str,
) -> Result<Value> {
    let raw = analyzer.analyze_image(image, system_prompt).await?;
    log::debug!("vision model replied with {} characters", raw.len());

    let Value::Object(mut specs) = parse_json_from_response(&raw)? else {
        return Err(DtxError::response_parse(
            "AI response is not a valid JSON object",
            &raw,
        ));
    };

    let mut metadata = Map::new();
    metadata.insert("source".into(), "ai-analysis".into());
    metadata.insert(
        "timestamp".into(),
        Utc::now()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .into(),
    );
    metadata.insert("model".into(), analyzer.model().into());
    metadata.insert("type".into(), "component-specs".into());
    specs.insert("metadata".into(), Value::Object(metadata));

    Ok(Value::Object(specs))
}
