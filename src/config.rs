use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::figma_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub const DEFAULT_VISION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub figma: FigmaSettings,
    pub vision: VisionSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigmaSettings {
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for FigmaSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionSettings {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_VISION_ENDPOINT.to_string(),
            model: DEFAULT_VISION_MODEL.to_string(),
            max_tokens: 4000,
            temperature: 0.1,
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./output"),
            pretty: true,
        }
    }
}

impl Config {
    /// `~/.config/dtx/config.toml`, when a home directory is known.
    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(|home| PathBuf::from(home).join(".config").join("dtx").join("config.toml"))
    }

    /// Explicit `path` if given, else the central config if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::central_config_path().filter(|p| p.is_file()) {
                Some(central) => Self::from_file(&central),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.figma.base_url.trim().is_empty() {
            return Err("figma.base_url must not be empty".to_string());
        }
        if self.figma.timeout.is_zero() {
            return Err("figma.timeout must be greater than zero".to_string());
        }
        if self.vision.endpoint.trim().is_empty() {
            return Err("vision.endpoint must not be empty".to_string());
        }
        if self.vision.model.trim().is_empty() {
            return Err("vision.model must not be empty".to_string());
        }
        if self.vision.max_tokens == 0 {
            return Err("vision.max_tokens must be greater than zero".to_string());
        }
        if !(0.0..=2.0).contains(&self.vision.temperature) {
            return Err(format!(
                "vision.temperature must be between 0 and 2 (got {})",
                self.vision.temperature
            ));
        }
        if self.vision.timeout.is_zero() {
            return Err("vision.timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}
