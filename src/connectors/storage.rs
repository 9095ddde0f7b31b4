use super::errors::ConnectorError;
use crate::configuration::StorageSettings;
use crate::forms::ImageFile;
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::Instrument;

/// Object storage holding product images.
#[async_trait]
pub trait StorageConnector: Send + Sync {
    /// Stores the image under a fresh name and returns its public URL.
    async fn upload(&self, image: &ImageFile) -> Result<String, ConnectorError>;

    /// Removes the object a public URL points at.
    async fn delete(&self, url: &str) -> Result<(), ConnectorError>;
}

/// Client for a Supabase-compatible storage REST API.
pub struct StorageClient {
    base_url: String,
    bucket: String,
    service_key: String,
    http_client: reqwest::Client,
}

impl StorageClient {
    pub fn new(settings: &StorageSettings) -> Result<Self, ConnectorError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| ConnectorError::Internal(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            bucket: settings.bucket.clone(),
            service_key: settings.service_key.clone(),
            http_client,
        })
    }

    fn object_url(&self, name: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, name)
    }

    pub fn public_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, name
        )
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.service_key.is_empty() {
            return builder;
        }
        builder
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
    }
}

#[async_trait]
impl StorageConnector for StorageClient {
    async fn upload(&self, image: &ImageFile) -> Result<String, ConnectorError> {
        let name = object_name(&image.name, chrono::Utc::now().timestamp_millis());
        let span = tracing::info_span!("storage_upload", bucket = %self.bucket, object = %name);

        let resp = self
            .authorized(self.http_client.post(self.object_url(&name)))
            .header(reqwest::header::CONTENT_TYPE, &image.content_type)
            .header(reqwest::header::CACHE_CONTROL, "max-age=3600")
            .body(image.bytes.clone())
            .send()
            .instrument(span)
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("Image upload failed with {}: {}", status, text);
            return Err(ConnectorError::from_status(status, text));
        }

        Ok(self.public_url(&name))
    }

    async fn delete(&self, url: &str) -> Result<(), ConnectorError> {
        let name = object_name_from_url(url)?;
        let span = tracing::info_span!("storage_delete", bucket = %self.bucket, object = %name);

        let resp = self
            .authorized(self.http_client.delete(format!(
                "{}/storage/v1/object/{}",
                self.base_url, self.bucket
            )))
            .json(&serde_json::json!({ "prefixes": [name] }))
            .send()
            .instrument(span)
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("Image delete failed with {}: {}", status, text);
            return Err(ConnectorError::from_status(status, text));
        }

        Ok(())
    }
}

/// `{unix_millis}-{file name}` with anything outside `[A-Za-z0-9._-]` replaced.
pub fn object_name(file_name: &str, unix_millis: i64) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let unsafe_chars = UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

    let file_name = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned = unsafe_chars.replace_all(file_name.trim(), "-");
    let cleaned = cleaned.trim_matches('-');
    let cleaned = if cleaned.is_empty() { "image" } else { cleaned };

    format!("{}-{}", unix_millis, cleaned)
}

/// The object name is the last path segment of its public URL.
pub fn object_name_from_url(url: &str) -> Result<String, ConnectorError> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ConnectorError::InvalidInput("Invalid URL".to_string())),
    }
}
