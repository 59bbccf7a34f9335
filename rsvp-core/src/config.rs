//! Server configuration.
//!
//! Loaded from an optional `rsvp.toml`, then overridden by `RSVP__*`
//! environment variables (`RSVP__STORAGE__BACKEND=firestore`,
//! `RSVP__STORAGE__FIRESTORE__PROJECT_ID=...`).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{RsvpError, RsvpResult};
use crate::event::EventDetails;

pub const DEFAULT_CONFIG_FILE: &str = "rsvp.toml";
const DEFAULT_DATA_FILE: &str = "rsvps.json";
const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_collection() -> String {
    "rsvps".to_string()
}

fn default_firestore_url() -> String {
    DEFAULT_FIRESTORE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsvpConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub event: EventDetails,
}

impl Default for RsvpConfig {
    fn default() -> Self {
        RsvpConfig {
            bind: default_bind(),
            storage: StorageConfig::default(),
            event: EventDetails::default(),
        }
    }
}

/// Which storage adapter backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Firestore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: Backend,

    /// JSON document used by the file backend, relative to the working directory.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firestore: Option<FirestoreConfig>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            backend: Backend::default(),
            path: default_data_path(),
            firestore: None,
        }
    }
}

impl StorageConfig {
    /// File backend path with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path.to_string_lossy()).into_owned())
    }

    pub fn firestore(&self) -> RsvpResult<&FirestoreConfig> {
        self.firestore.as_ref().ok_or_else(|| {
            RsvpError::Config(
                "storage.backend is \"firestore\" but [storage.firestore] is missing".into(),
            )
        })
    }
}

/// Hosted document collection settings (Firestore REST API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    pub project_id: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_collection")]
    pub collection: String,

    /// Override to target the Firestore emulator.
    #[serde(default = "default_firestore_url")]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl FirestoreConfig {
    pub fn new(project_id: &str) -> Self {
        FirestoreConfig {
            project_id: project_id.to_string(),
            database: default_database(),
            collection: default_collection(),
            base_url: default_firestore_url(),
            api_key: None,
            bearer_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RsvpConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist; without one, `./rsvp.toml` is read when present.
    pub fn load(path: Option<&Path>) -> RsvpResult<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
        };

        let config: RsvpConfig = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("RSVP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| RsvpError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RsvpError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document without consulting the environment.
    pub fn from_toml(contents: &str) -> RsvpResult<Self> {
        let config: RsvpConfig = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()
            .map_err(|e| RsvpError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RsvpError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> RsvpResult<()> {
        if self.storage.backend == Backend::Firestore {
            let firestore = self.storage.firestore()?;
            if firestore.project_id.trim().is_empty() {
                return Err(RsvpError::Config(
                    "storage.firestore.project_id must not be empty".into(),
                ));
            }
        }
        Ok(())
    }

    /// Effective configuration as TOML. Credentials are masked.
    pub fn to_toml(&self) -> RsvpResult<String> {
        let mut shown = self.clone();
        if let Some(firestore) = shown.storage.firestore.as_mut() {
            for secret in [&mut firestore.api_key, &mut firestore.bearer_token] {
                if secret.is_some() {
                    *secret = Some("***".into());
                }
            }
        }
        toml::to_string_pretty(&shown).map_err(|e| RsvpError::Config(e.to_string()))
    }

    /// A config file with every option commented out.
    pub fn default_config_contents() -> String {
        format!(
            "\
# RSVP server configuration

# Address to listen on:
# bind = \"{DEFAULT_BIND}\"

[storage]
# \"file\" keeps every RSVP in one JSON document,
# \"firestore\" stores one document per RSVP in a hosted collection.
# backend = \"file\"
# path = \"{DEFAULT_DATA_FILE}\"

# [storage.firestore]
# project_id = \"my-project\"
# database = \"(default)\"
# collection = \"rsvps\"
# base_url = \"{DEFAULT_FIRESTORE_URL}\"
# api_key = \"...\"
# timeout_secs = 10

# [event]
# title = \"Greek Easter Celebration\"
# date = \"April 20, 2025\"
"
        )
    }

    /// Write the commented template, creating parent directories.
    pub fn create_default_config(path: &Path) -> RsvpResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                RsvpError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, Self::default_config_contents())
            .map_err(|e| RsvpError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
