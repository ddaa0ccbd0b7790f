//! Request bodies of the create/edit endpoints.
//!
//! The same handler accepts `multipart/form-data`, JSON or url-encoded
//! bodies. All of them are flattened into text fields plus at most one file,
//! and typed values are parsed per field so a bad value is reported by name.

use std::collections::HashMap;

use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{ServerError, media::UploadedFile};

/// Name under which the image is reported when missing.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    file: Option<UploadedFile>,
}

impl FormData {
    /// Fail with every name of `required` that is absent. [`IMAGE_FIELD`]
    /// is satisfied by an attached file.
    pub fn require(&self, required: &[&str]) -> Result<(), ServerError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|field| {
                if **field == IMAGE_FIELD {
                    self.file.is_none()
                } else {
                    !self.fields.contains_key(**field)
                }
            })
            .map(ToString::to_string)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ServerError::MissingFields(missing))
        }
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).cloned()
    }

    pub fn required_text(&self, key: &str) -> Result<String, ServerError> {
        self.text(key)
            .ok_or_else(|| ServerError::MissingFields(vec![key.to_string()]))
    }

    /// `true`/`false`, case-insensitive.
    pub fn flag(&self, key: &str) -> Result<Option<bool>, ServerError> {
        self.fields
            .get(key)
            .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(invalid(key, "must be true or false")),
            })
            .transpose()
    }

    pub fn required_flag(&self, key: &str) -> Result<bool, ServerError> {
        self.flag(key)?
            .ok_or_else(|| ServerError::MissingFields(vec![key.to_string()]))
    }

    pub fn number(&self, key: &str) -> Result<Option<f64>, ServerError> {
        self.fields
            .get(key)
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| invalid(key, "must be a number"))
            })
            .transpose()
    }

    pub fn required_number(&self, key: &str) -> Result<f64, ServerError> {
        self.number(key)?
            .ok_or_else(|| ServerError::MissingFields(vec![key.to_string()]))
    }

    pub fn id(&self, key: &str) -> Result<Option<Uuid>, ServerError> {
        self.fields
            .get(key)
            .map(|raw| parse_id(raw, key))
            .transpose()
    }

    pub fn required_id(&self, key: &str) -> Result<Uuid, ServerError> {
        self.id(key)?
            .ok_or_else(|| ServerError::MissingFields(vec![key.to_string()]))
    }

    pub fn take_file(&mut self) -> Option<UploadedFile> {
        self.file.take()
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ServerError> {
        let mut form = FormData::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| ServerError::Generic(err.body_text()))?
        {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };

            if let Some(file_name) = field.file_name().map(ToString::to_string) {
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| ServerError::Generic(err.body_text()))?;
                // Browsers send an empty part for an untouched file input.
                if bytes.is_empty() || form.file.is_some() {
                    continue;
                }
                form.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|err| ServerError::Generic(err.body_text()))?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    fn from_json(body: serde_json::Map<String, Value>) -> Self {
        let fields = body
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(text) => Some((key, text)),
                other => Some((key, other.to_string())),
            })
            .collect();
        Self { fields, file: None }
    }
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|err| ServerError::Generic(err.body_text()))?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let Json(body) = Json::<serde_json::Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|err| ServerError::Generic(err.body_text()))?;
            Ok(Self::from_json(body))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|err| ServerError::Generic(err.body_text()))?;
            Ok(Self { fields, file: None })
        } else if content_type.is_empty() {
            Ok(Self::default())
        } else {
            Err(ServerError::Generic(format!(
                "unsupported content type: {content_type}"
            )))
        }
    }
}

/// Parse a record id coming from a body, query string or path.
pub fn parse_id(raw: &str, key: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(raw.trim()).map_err(|_| invalid(key, "must be a valid id"))
}

fn invalid(key: &str, reason: &str) -> ServerError {
    ServerError::Generic(format!("{key} {reason}"))
}
