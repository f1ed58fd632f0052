use thiserror::Error;
use url::Url;

use crate::error::DtxError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceParseError {
    #[error("Invalid URL '{value}': {message}. Hint: include http(s):// and ensure the URL is well-formed.")]
    InvalidUrl { value: String, message: String },
    #[error("Figma URL missing file key in '{url}'. Hint: use https://www.figma.com/file/<FILE_KEY>/...")]
    FigmaMissingFileKey { url: String },
    #[error("'{value}' is not a Figma URL. Hint: links must point at figma.com/file/... or figma.com/design/...")]
    NotFigma { value: String },
    #[error("Invalid file key '{value}'. Hint: a file key contains only letters and digits.")]
    InvalidFileKey { value: String },
}

impl From<ResourceParseError> for DtxError {
    fn from(err: ResourceParseError) -> Self {
        DtxError::Config(err.to_string())
    }
}

/// Resolve the `--file` argument to a Figma file key.
///
/// Accepts a bare key or a link such as
/// `https://www.figma.com/design/<KEY>/Name?node-id=1-2`.
pub fn parse_file_key(value: &str) -> Result<String, ResourceParseError> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        return parse_figma_url(value);
    }
    validate_key(value)
}

fn validate_key(key: &str) -> Result<String, ResourceParseError> {
    if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(key.to_string())
    } else {
        Err(ResourceParseError::InvalidFileKey {
            value: key.to_string(),
        })
    }
}

fn parse_figma_url(value: &str) -> Result<String, ResourceParseError> {
    let url = Url::parse(value).map_err(|e| ResourceParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    let host = url.host_str().unwrap_or("");
    if host != "figma.com" && !host.ends_with(".figma.com") {
        return Err(ResourceParseError::NotFigma {
            value: value.to_string(),
        });
    }

    let path_segments: Vec<&str> = url.path_segments().map(|c| c.collect()).unwrap_or_default();

    path_segments
        .iter()
        .position(|&s| s == "file" || s == "design")
        .and_then(|i| path_segments.get(i + 1))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ResourceParseError::FigmaMissingFileKey {
            url: value.to_string(),
        })
        .and_then(|key| validate_key(key))
}
