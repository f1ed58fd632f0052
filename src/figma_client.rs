use crate::error::{DtxError, Result};
use crate::figma::{ComponentsResponse, FigmaFile, StylesResponse, VariablesResponse};
use async_trait::async_trait;
#[cfg(test)]
use reqwest::header::HeaderMap;
use reqwest::{header::RETRY_AFTER, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.figma.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the extractors need from a design file, fetched remotely.
///
/// `fetch_file` and `fetch_styles` are required; callers treat failures of
/// `fetch_components` and `fetch_local_variables` as "no data".
#[async_trait]
pub trait DesignSource: Send + Sync {
    async fn fetch_file(&self, file_key: &str) -> Result<FigmaFile>;
    async fn fetch_styles(&self, file_key: &str) -> Result<StylesResponse>;
    async fn fetch_components(&self, file_key: &str) -> Result<ComponentsResponse>;
    async fn fetch_local_variables(&self, file_key: &str) -> Result<VariablesResponse>;
}

#[derive(Debug, Clone)]
pub enum FigmaAuth {
    PersonalAccessToken(String),
    OAuthToken(String),
}

impl FigmaAuth {
    /// `FIGMA_TOKEN` (or the older `FIGMA_API_TOKEN`) wins over `FIGMA_OAUTH_TOKEN`.
    pub fn from_env() -> Option<Self> {
        for var in ["FIGMA_TOKEN", "FIGMA_API_TOKEN"] {
            if let Ok(token) = std::env::var(var) {
                if !token.is_empty() {
                    return Some(Self::PersonalAccessToken(token));
                }
            }
        }

        if let Ok(token) = std::env::var("FIGMA_OAUTH_TOKEN") {
            if !token.is_empty() {
                return Some(Self::OAuthToken(token));
            }
        }

        None
    }

    /// Like [`FigmaAuth::from_env`], but a missing token is a configuration error.
    pub fn require_from_env() -> Result<Self> {
        Self::from_env().ok_or_else(|| {
            DtxError::Config(
                "FIGMA_TOKEN environment variable is required (or FIGMA_OAUTH_TOKEN)".to_string(),
            )
        })
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            FigmaAuth::PersonalAccessToken(token) => builder.header("X-Figma-Token", token),
            FigmaAuth::OAuthToken(token) => builder.bearer_auth(token),
        }
    }

    #[cfg(test)]
    fn apply_to_header_map(&self, headers: &mut HeaderMap) {
        match self {
            FigmaAuth::PersonalAccessToken(token) => {
                headers.insert("X-Figma-Token", token.parse().unwrap());
            }
            FigmaAuth::OAuthToken(token) => {
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    format!("Bearer {token}").parse().unwrap(),
                );
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: Client,
    auth: FigmaAuth,
    base_url: Url,
}

impl FigmaClient {
    pub fn new(auth: FigmaAuth) -> Result<Self> {
        Self::with_base_url_and_timeout(auth, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_base_url_and_timeout(
        auth: FigmaAuth,
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self> {
        let token = match &auth {
            FigmaAuth::PersonalAccessToken(token) | FigmaAuth::OAuthToken(token) => token,
        };
        if token.trim().is_empty() {
            return Err(DtxError::Config("Figma token is empty".to_string()));
        }

        let base_url = Url::parse(base_url.as_ref())?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DtxError::Network)?;

        Ok(Self {
            http,
            auth,
            base_url,
        })
    }

    pub async fn fetch_file(&self, file_key: &str) -> Result<FigmaFile> {
        self.get_json(&format!("/v1/files/{file_key}")).await
    }

    pub async fn fetch_styles(&self, file_key: &str) -> Result<StylesResponse> {
        self.get_json(&format!("/v1/files/{file_key}/styles")).await
    }

    pub async fn fetch_components(&self, file_key: &str) -> Result<ComponentsResponse> {
        self.get_json(&format!("/v1/files/{file_key}/components"))
            .await
    }

    pub async fn fetch_local_variables(&self, file_key: &str) -> Result<VariablesResponse> {
        self.get_json(&format!("/v1/files/{file_key}/variables/local"))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        log::debug!("GET {url}");
        let req = self.authed(self.http.get(url));
        self.send_json(req).await
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        self.auth.apply(builder)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(DtxError::InvalidUrl)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(DtxError::Network)?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str(&body).map_err(DtxError::Serialization);
        }

        Err(DtxError::figma_api(
            Some(status),
            error_message(status, &body, retry_after.as_deref()),
        ))
    }
}

#[async_trait]
impl DesignSource for FigmaClient {
    async fn fetch_file(&self, file_key: &str) -> Result<FigmaFile> {
        FigmaClient::fetch_file(self, file_key).await
    }

    async fn fetch_styles(&self, file_key: &str) -> Result<StylesResponse> {
        FigmaClient::fetch_styles(self, file_key).await
    }

    async fn fetch_components(&self, file_key: &str) -> Result<ComponentsResponse> {
        FigmaClient::fetch_components(self, file_key).await
    }

    async fn fetch_local_variables(&self, file_key: &str) -> Result<VariablesResponse> {
        FigmaClient::fetch_local_variables(self, file_key).await
    }
}

fn error_message(status: StatusCode, body: &str, retry_after: Option<&str>) -> String {
    let fallback = format!("Figma API returned status {}", status.as_u16());
    let parsed = serde_json::from_str::<Value>(body).ok();
    let from_body = parsed
        .as_ref()
        .and_then(|value| {
            value
                .get("err")
                .or_else(|| value.get("error"))
                .or_else(|| value.get("message"))
        })
        .and_then(Value::as_str)
        .map(str::to_owned);

    match (status, retry_after, from_body) {
        (StatusCode::TOO_MANY_REQUESTS, Some(retry), Some(msg)) => {
            format!("{msg} (rate limited, retry after {retry}s)")
        }
        (StatusCode::TOO_MANY_REQUESTS, Some(retry), None) => {
            format!("rate limited by Figma API, retry after {retry}s")
        }
        (_, _, Some(msg)) => msg,
        _ => fallback,
    }
}
