//! Fetch a design file and run both extraction engines over it.

use serde::Serialize;

use crate::components::{component_specs_document, ComponentSpecsDocument};
use crate::error::Result;
use crate::extraction::SkippedItem;
use crate::figma::{ComponentsResponse, FigmaFile, StylesResponse, VariablesResponse};
use crate::figma_client::DesignSource;
use crate::tokens::{extract_tokens, DesignTokens};

/// Raw inputs of one extraction pass.
#[derive(Debug, Clone, Default)]
pub struct DesignPayload {
    pub file: FigmaFile,
    pub styles: StylesResponse,
    pub components: ComponentsResponse,
    pub variables: VariablesResponse,
}

/// Both output documents plus everything that was dropped on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSystem {
    pub tokens: DesignTokens,
    pub components: ComponentSpecsDocument,
    pub skipped: Vec<SkippedItem>,
}

/// Fetch everything needed for `file_key`.
///
/// The file and its published styles are required and fetched together.
/// Published components and local variables are optional: a failure is
/// logged and replaced by an empty payload.
pub async fn fetch_design_payload<S>(source: &S, file_key: &str) -> Result<DesignPayload>
where
    S: DesignSource + ?Sized,
{
    log::info!("fetching design file {file_key}");
    let (file, styles) = tokio::try_join!(
        source.fetch_file(file_key),
        source.fetch_styles(file_key)
    )?;

    let components = source
        .fetch_components(file_key)
        .await
        .unwrap_or_else(|err| {
            log::warn!("published components unavailable, continuing without them: {err}");
            ComponentsResponse::default()
        });

    let variables = source
        .fetch_local_variables(file_key)
        .await
        .unwrap_or_else(|err| {
            log::warn!("local variables unavailable, continuing without them: {err}");
            VariablesResponse::default()
        });

    log::info!(
        "fetched {:?}: {} styles, {} published components, {} variables",
        file.name,
        styles.meta.styles.len(),
        components.meta.components.len(),
        variables.meta.variables.len()
    );

    Ok(DesignPayload {
        file,
        styles,
        components,
        variables,
    })
}

/// Run the token and component engines over one payload.
pub fn extract_design_system(payload: &DesignPayload) -> DesignSystem {
    let tokens = extract_tokens(&payload.file, &payload.styles, &payload.variables);
    let components = component_specs_document(&payload.file, &payload.components);

    let mut skipped = tokens.skipped;
    skipped.extend(components.skipped);

    DesignSystem {
        tokens: tokens.value,
        components: components.value,
        skipped,
    }
}
