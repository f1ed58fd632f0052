use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

use crate::image_loader::ImageLoadError;

/// Number of characters of an unparseable response kept for diagnostics.
pub const RESPONSE_SNIPPET_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum DtxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Figma API error (status: {status:?}): {message}")]
    FigmaApi {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Response parse error: {message}")]
    ResponseParse { message: String, snippet: String },

    #[error("Image error: {0}")]
    Image(String),

    #[error("Vision model error: {0}")]
    Vision(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl DtxError {
    pub fn figma_api(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        DtxError::FigmaApi {
            status,
            message: message.into(),
        }
    }

    pub fn vision(message: impl Into<String>) -> Self {
        DtxError::Vision(message.into())
    }

    /// Build a parse error carrying the head of the text that failed to parse.
    pub fn response_parse(message: impl Into<String>, text: &str) -> Self {
        DtxError::ResponseParse {
            message: message.into(),
            snippet: text.chars().take(RESPONSE_SNIPPET_CHARS).collect(),
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            DtxError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions and the output directory.",
            ),
            DtxError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN and retry.",
            ),
            DtxError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify the URL (e.g., https://www.figma.com/design/<FILE_KEY>/...).",
            ),
            DtxError::FigmaApi { status, message } => {
                let remediation = match status.map(|s| s.as_u16()) {
                    Some(401) | Some(403) => {
                        "Check FIGMA_TOKEN has access to the file and has not expired."
                    }
                    Some(404) => "Verify the file key; the file may be private or deleted.",
                    Some(429) => "Rate limited by Figma; wait for Retry-After and rerun.",
                    _ => "Check FIGMA_TOKEN/file key and rate limits; retry after waiting.",
                };
                ErrorPayload::new(
                    ErrorCategory::Figma,
                    format!("Figma API error (status {:?}): {}", status, message),
                    remediation,
                )
            }
            DtxError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Parse,
                e.to_string(),
                "The payload did not match the expected JSON shape; rerun with -vv for details.",
            ),
            DtxError::ResponseParse { message, snippet } => ErrorPayload::new(
                ErrorCategory::Parse,
                format!("{message}; response starts with: {snippet}"),
                "The model did not return a JSON object; adjust the prompt or retry.",
            ),
            DtxError::Image(msg) => ErrorPayload::new(
                ErrorCategory::Image,
                msg.to_string(),
                "Use a PNG, JPEG or WebP screenshot smaller than 20 MB.",
            ),
            DtxError::Vision(msg) => ErrorPayload::new(
                ErrorCategory::Vision,
                msg.to_string(),
                "Check DTX_VISION_API_KEY/OPENAI_API_KEY, the endpoint and the model name.",
            ),
            DtxError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("figma_token") || lower.contains("figma token") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set FIGMA_TOKEN (or FIGMA_OAUTH_TOKEN) before extracting from Figma.",
                    )
                } else if lower.contains("api key") || lower.contains("openai_api_key") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set DTX_VISION_API_KEY (or OPENAI_API_KEY) before analyzing images.",
                    )
                } else if lower.contains("file key") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Pass a bare file key or a URL like https://www.figma.com/file/<FILE_KEY>/...",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags, the config file and required environment variables.",
                    )
                }
            }
            DtxError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with -vv; file an issue if persistent.",
            ),
        }
    }
}

impl From<ImageLoadError> for DtxError {
    fn from(err: ImageLoadError) -> Self {
        match err {
            ImageLoadError::Read(e) => DtxError::Io(e),
            other => DtxError::Image(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DtxError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Network,
    Figma,
    Parse,
    Image,
    Vision,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
