//! HTTP clients for the print and style translation services.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use print_common::{
    PrintError, PrintResult, StyleTranslation, StyleTranslationError, StyleTranslator,
};
use print_spec::{PrintService, PrintSpec};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Print service reached over HTTP: the print specification is POSTed as JSON and the
/// response body is the rendered image.
pub struct HttpPrintService {
    client: Client,
    url: String,
}

impl HttpPrintService {
    pub fn new(url: impl Into<String>, timeout: Duration) -> PrintResult<Self> {
        let client = build_client(timeout)
            .map_err(|e| PrintError::PrintService(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl PrintService for HttpPrintService {
    #[instrument(skip_all, fields(url = %self.url, layers = spec.layers.len()))]
    async fn print(&self, spec: &PrintSpec) -> PrintResult<Bytes> {
        let response = self
            .client
            .post(&self.url)
            .json(spec)
            .send()
            .await
            .map_err(|e| PrintError::PrintService(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PrintError::PrintService(format!(
                "{} returned {}: {}",
                self.url, status, body
            )));
        }

        let image = response
            .bytes()
            .await
            .map_err(|e| PrintError::PrintService(format!("Failed to read image: {}", e)))?;

        debug!(bytes = image.len(), "Received rendered image");
        Ok(image)
    }
}

/// Style translation service reached over HTTP: the native style is POSTed
/// as JSON and answered with a [`StyleTranslation`] document.
pub struct HttpStyleTranslator {
    client: Client,
    url: String,
}

impl HttpStyleTranslator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> PrintResult<Self> {
        let client = build_client(timeout)
            .map_err(|e| PrintError::Config(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl StyleTranslator for HttpStyleTranslator {
    async fn translate(&self, style: &Value) -> Result<StyleTranslation, StyleTranslationError> {
        let response = self
            .client
            .post(&self.url)
            .json(style)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| StyleTranslationError(format!("{}: {}", self.url, e)))?;

        response
            .json::<StyleTranslation>()
            .await
            .map_err(|e| StyleTranslationError(format!("Invalid response from {}: {}", self.url, e)))
    }
}
