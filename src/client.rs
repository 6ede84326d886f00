//! Ad upload client.
//!
//! Submits an ad to a running Ganudenu server the same way the upload page
//! does: one multipart request with the seller fields and the photos.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::middleware::API_KEY_HEADER;
use crate::models::AdDetails;
use crate::{Error, Result};

/// Default server the client talks to.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Default request timeout. Collage and page rendering can take a while.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// An ad to submit: the seller fields and local photo paths.
#[derive(Debug, Clone)]
pub struct AdRequest {
    pub details: AdDetails,
    pub image_paths: Vec<PathBuf>,
}

/// HTTP client for `POST /api/ads`.
#[derive(Debug, Clone)]
pub struct AdClient {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl AdClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base = Url::parse(config.server_url.trim_end_matches('/')).map_err(|e| {
            Error::InvalidInput(format!("Invalid server URL {}: {}", config.server_url, e))
        })?;
        let endpoint = Url::parse(&format!("{}/api/ads", base.as_str().trim_end_matches('/')))
            .map_err(|e| Error::InvalidInput(format!("Invalid server URL: {}", e)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ganudenu-send-ad/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.filter(|k| !k.is_empty()),
        })
    }

    /// Endpoint ads are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Upload an ad and return the server's JSON response.
    ///
    /// Photos that do not exist locally are skipped with a warning.
    pub async fn send_ad(&self, request: &AdRequest) -> Result<serde_json::Value> {
        let mut form = Form::new();
        for (name, value) in request.details.form_fields() {
            form = form.text(name, value.to_string());
        }

        let mut attached = 0;
        for path in &request.image_paths {
            let data = match tokio::fs::read(path).await {
                Ok(data) => data,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!("Image not found, skipping: {}", path.display());
                    continue;
                }
                Err(e) => {
                    return Err(Error::FileNotFound(format!("{}: {}", path.display(), e)));
                }
            };

            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("image.jpg")
                .to_string();
            let part = Part::bytes(data)
                .file_name(file_name)
                .mime_str("image/jpeg")?;
            form = form.part("images", part);
            attached += 1;
        }

        debug!(images = attached, "Posting ad to {}", self.endpoint);

        let mut builder = self.client.post(self.endpoint.clone()).multipart(form);
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Internal(format!("Failed to parse response: {}", e)))
    }
}
