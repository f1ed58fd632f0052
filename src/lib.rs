//! Design Token Extractor (dtx) Library
//!
//! Normalizes Figma design files into design tokens and component specs, and
//! turns design screenshots into component specs with a vision model.
//!
//! # Module Overview
//!
//! - [`figma`] - Figma REST payload types and document tree walking
//! - [`figma_client`] - Figma API client behind the [`DesignSource`] trait
//! - [`tokens`] - Token extraction engine (colors, typography, spacing, effects, radius, stroke)
//! - [`components`] - Component extraction engine
//! - [`extractor`] - Fetch a file and run both engines
//! - [`vision`] - Screenshot analysis through an [`ImageAnalyzer`]
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use dtx_lib::{extract_design_system, fetch_design_payload, FigmaAuth, FigmaClient};
//!
//! # async fn example() -> dtx_lib::Result<()> {
//! let client = FigmaClient::new(FigmaAuth::require_from_env()?)?;
//! let payload = fetch_design_payload(&client, "AbC123").await?;
//! let system = extract_design_system(&payload);
//! println!("{}", serde_json::to_string_pretty(&system.tokens)?);
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod components;
pub mod config;
pub mod error;
pub mod extraction;
pub mod extractor;
pub mod figma;
pub mod figma_client;
pub mod fixtures;
pub mod image_loader;
pub mod naming;
pub mod output;
pub mod recovery;
pub mod resource;
pub mod scale;
pub(crate) mod serde_helpers;
pub mod tokens;
pub mod vision;

pub use components::{
    component_specs_document, extract_components, fallback_components, ComponentSpec,
    ComponentSpecsDocument, PropertyBag, PropertyValue, VariantProperty,
};
pub use config::Config;
pub use error::{DtxError, ErrorCategory, ErrorPayload, Result};
pub use extraction::{Extraction, SkippedItem};
pub use extractor::{extract_design_system, fetch_design_payload, DesignPayload, DesignSystem};
pub use figma_client::{DesignSource, FigmaAuth, FigmaClient};
pub use fixtures::DirectorySource;
pub use image_loader::{load_screenshot, validate_image_bytes, ImageLoadError, ScreenshotImage};
pub use naming::normalize_token_name;
pub use output::{
    AnalyzeImageOutput, DtxOutput, ErrorOutput, ExtractOutput, TokenCounts, DTX_OUTPUT_VERSION,
};
pub use recovery::parse_json_from_response;
pub use resource::{parse_file_key, ResourceParseError};
pub use tokens::{extract_tokens, DesignTokens, EffectToken, TokenCategory, TypographyToken};
pub use vision::{
    analyze_screenshot, ImageAnalyzer, StaticAnalyzer, VisionClient, VisionClientConfig,
    DEFAULT_SYSTEM_PROMPT,
};
