//! Image hosting.
//!
//! Uploaded images are pushed to a media host and only the public URL it
//! returns is stored with the record.

use std::collections::BTreeMap;

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// A file received in a multipart request, held in memory.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("media host rejected the upload ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("media host response has no secure_url")]
    MissingUrl,
}

/// Turns a local file into a durable public URL.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, file: UploadedFile) -> Result<String, MediaError>;
}

/// Credentials for the Cloudinary upload API.
#[derive(Clone, Debug)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Destination folder on the media host.
    pub folder: Option<String>,
    /// Overrides `https://api.cloudinary.com`.
    pub api_base: Option<String>,
}

/// [`MediaUploader`] backed by Cloudinary signed uploads.
#[derive(Clone, Debug)]
pub struct CloudinaryUploader {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: String,
}

impl CloudinaryUploader {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn upload_url(&self) -> String {
        let base = self
            .config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');
        format!("{base}/v1_1/{}/auto/upload", self.config.cloud_name)
    }

    /// Parameters covered by the signature.
    fn signed_params(&self, timestamp: i64) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();
        params.insert("timestamp", timestamp.to_string());
        if let Some(folder) = &self.config.folder {
            params.insert("folder", folder.clone());
        }
        params
    }
}

/// Hex SHA-256 of `k1=v1&k2=v2...` (keys sorted) followed by the secret.
pub(crate) fn sign(params: &BTreeMap<&'static str, String>, secret: &str) -> String {
    let joined = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, file: UploadedFile) -> Result<String, MediaError> {
        let params = self.signed_params(chrono::Utc::now().timestamp());
        let signature = sign(&params, &self.config.api_secret);

        let mut part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
        if let Some(content_type) = file.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }

        let mut form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body: UploadResponse = response.json().await?;

        if !status.is_success() {
            let message = body
                .error
                .map(|err| err.message)
                .unwrap_or_else(|| status.to_string());
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let url = body.secure_url.ok_or(MediaError::MissingUrl)?;
        tracing::debug!(file = %file.file_name, %url, "image uploaded");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploader(folder: Option<&str>, api_base: Option<&str>) -> CloudinaryUploader {
        CloudinaryUploader::new(CloudinaryConfig {
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            folder: folder.map(ToString::to_string),
            api_base: api_base.map(ToString::to_string),
        })
    }

    #[test]
    fn signature_is_sorted_params_then_secret() {
        let mut params = BTreeMap::new();
        params.insert("timestamp", "1315060510".to_string());
        params.insert("folder", "catalog".to_string());

        let mut hasher = Sha256::new();
        hasher.update(b"folder=catalog&timestamp=1315060510secret");
        let expected = hex::encode(hasher.finalize());

        assert_eq!(sign(&params, "secret"), expected);
        assert_eq!(sign(&params, "secret").len(), 64);
    }

    #[test]
    fn folder_is_signed_only_when_configured() {
        assert!(!uploader(None, None).signed_params(1).contains_key("folder"));
        assert_eq!(
            uploader(Some("catalog"), None).signed_params(1).get("folder"),
            Some(&"catalog".to_string())
        );
    }

    #[test]
    fn upload_url_targets_auto_resource_type() {
        assert_eq!(
            uploader(None, None).upload_url(),
            "https://api.cloudinary.com/v1_1/demo/auto/upload"
        );
        assert_eq!(
            uploader(None, Some("http://localhost:9000/")).upload_url(),
            "http://localhost:9000/v1_1/demo/auto/upload"
        );
    }
}
