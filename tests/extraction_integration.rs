mod common;

use async_trait::async_trait;
use dtx_lib::figma::{ComponentsResponse, FigmaFile, StylesResponse, VariablesResponse};
use dtx_lib::{
    extract_design_system, fetch_design_payload, DesignSource, DirectorySource, DtxError, Result,
};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Serves the shared fixtures from memory; optional endpoints can be made to fail.
struct StubSource {
    fail_variables: bool,
    fail_file: bool,
}

impl StubSource {
    fn healthy() -> Self {
        Self {
            fail_variables: false,
            fail_file: false,
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl DesignSource for StubSource {
    async fn fetch_file(&self, _file_key: &str) -> Result<FigmaFile> {
        if self.fail_file {
            return Err(DtxError::figma_api(
                Some(reqwest::StatusCode::NOT_FOUND),
                "Not found",
            ));
        }
        decode(common::file_json())
    }

    async fn fetch_styles(&self, _file_key: &str) -> Result<StylesResponse> {
        decode(common::styles_json())
    }

    async fn fetch_components(&self, _file_key: &str) -> Result<ComponentsResponse> {
        decode(common::components_json())
    }

    async fn fetch_local_variables(&self, _file_key: &str) -> Result<VariablesResponse> {
        if self.fail_variables {
            return Err(DtxError::figma_api(
                Some(reqwest::StatusCode::FORBIDDEN),
                "Variables require an Enterprise plan",
            ));
        }
        decode(common::variables_json())
    }
}

#[tokio::test]
async fn extracts_tokens_and_components_end_to_end() {
    let payload = fetch_design_payload(&StubSource::healthy(), "AbC123")
        .await
        .expect("fetch payload");
    let system = extract_design_system(&payload);

    let tokens = serde_json::to_value(&system.tokens).expect("serialize tokens");
    assert_eq!(tokens["color"], json!({"brand-primary": "#007AFF"}));
    assert_eq!(tokens["spacing"], json!({"spacing-md": 12}));
    assert_eq!(tokens["borderRadius"], json!({"md": 4}));
    assert_eq!(tokens["strokeWeight"], json!({"thin": 1}));

    let typography = tokens["typography"].as_object().unwrap();
    let names: Vec<&str> = typography.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["heading-xl", "heading-lg", "body"]);
    assert_eq!(tokens["effects"].as_object().unwrap().len(), 2);

    let keys: Vec<&str> = tokens
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec!["color", "typography", "spacing", "effects", "borderRadius", "strokeWeight"]
    );

    let components = serde_json::to_value(&system.components).expect("serialize components");
    assert_eq!(components["version"], "4242");
    assert_eq!(components["lastModified"], "2024-05-01T12:00:00Z");
    let list = components["components"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], "1:1");
    assert_eq!(list[0]["type"], "component");
    assert_eq!(list[0]["description"], "Primary action");
    assert_eq!(list[1]["id"], "icon");
    assert_eq!(list[1]["properties"]["fileKey"], "AbC123");

    assert_eq!(system.skipped.len(), 1);
    assert_eq!(system.skipped[0].item, "style Heading/H1");
    assert!(system.skipped[0].reason.contains("k-missing"));
}

#[tokio::test]
async fn missing_variables_fall_back_to_document_spacing() {
    let source = StubSource {
        fail_variables: true,
        fail_file: false,
    };
    let payload = fetch_design_payload(&source, "AbC123")
        .await
        .expect("optional endpoint failure is tolerated");
    let system = extract_design_system(&payload);

    let spacing = serde_json::to_value(&system.tokens.spacing).unwrap();
    // itemSpacing 8 on the auto-layout frame, paddingLeft 16.
    assert_eq!(spacing, json!({"md": 8, "xl": 16}));
}

#[tokio::test]
async fn required_fetch_failure_is_returned() {
    let source = StubSource {
        fail_variables: false,
        fail_file: true,
    };
    let err = fetch_design_payload(&source, "AbC123").await.unwrap_err();
    assert!(matches!(err, DtxError::FigmaApi { .. }));
}

#[tokio::test]
async fn directory_source_matches_in_memory_source() {
    let dir = TempDir::new().expect("tempdir");
    common::write_fixture_dir(dir.path());

    let from_disk = extract_design_system(
        &fetch_design_payload(&DirectorySource::new(dir.path()), "ignored")
            .await
            .expect("fetch from fixtures"),
    );
    let in_memory = extract_design_system(
        &fetch_design_payload(&StubSource::healthy(), "ignored")
            .await
            .unwrap(),
    );

    assert_eq!(from_disk, in_memory);
}

#[tokio::test]
async fn empty_file_produces_fallback_documents() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("file.json"), "{}").unwrap();
    std::fs::write(dir.path().join("styles.json"), "{}").unwrap();

    let payload = fetch_design_payload(&DirectorySource::new(dir.path()), "ignored")
        .await
        .expect("components and variables are optional");
    let system = extract_design_system(&payload);

    assert_eq!(system.tokens.color.len(), 4);
    assert_eq!(system.tokens.border_radius.len(), 6);
    let ids: Vec<&str> = system
        .components
        .components
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["button-component", "input-component", "card-component"]);
    assert!(system.skipped.is_empty());
}
