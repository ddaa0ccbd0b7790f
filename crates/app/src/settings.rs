//! Application settings.
//!
//! `CONFIG_DATA` holds a JSON object of named profiles. The selected profile
//! is layered over `development`, so a profile only lists what it changes.

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use serde_json::Value;

pub const BASE_PROFILE: &str = "development";

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub body_limit: Option<usize>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
    Url(String),
}

#[derive(Debug, Deserialize)]
pub struct Cloudinary {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: Option<String>,
    pub api_base: Option<String>,
}

impl From<Cloudinary> for server::CloudinaryConfig {
    fn from(value: Cloudinary) -> Self {
        Self {
            cloud_name: value.cloud_name,
            api_key: value.api_key,
            api_secret: value.api_secret,
            folder: value.folder,
            api_base: value.api_base,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Server,
    pub database: Database,
    pub cloudinary: Cloudinary,
}

impl Settings {
    /// Build the settings of `profile` from the raw `CONFIG_DATA` blob.
    pub fn from_json(raw: &str, profile: &str) -> Result<Self, ConfigError> {
        let profiles: serde_json::Map<String, Value> = serde_json::from_str(raw)
            .map_err(|err| ConfigError::Message(format!("CONFIG_DATA is not a JSON object: {err}")))?;

        let selected = profiles
            .get(profile)
            .ok_or_else(|| ConfigError::NotFound(format!("profile `{profile}`")))?;

        let mut builder = Config::builder();
        if profile != BASE_PROFILE
            && let Some(base) = profiles.get(BASE_PROFILE)
        {
            builder = builder.add_source(File::from_str(&base.to_string(), FileFormat::Json));
        }

        builder
            .add_source(File::from_str(&selected.to_string(), FileFormat::Json))
            .build()?
            .try_deserialize()
    }
}
