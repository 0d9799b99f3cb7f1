use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Environment variable that takes precedence over any stored API key
pub const API_KEY_ENV: &str = "POPCORN_OMDB_API_KEY";

const OMDB_API_KEY: &str = "omdb_api_key";

/// Where the effective API key was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment,
    CredentialsFile,
    ConfigFile,
}

impl ApiKeySource {
    pub fn describe(&self) -> &'static str {
        match self {
            ApiKeySource::Environment => API_KEY_ENV,
            ApiKeySource::CredentialsFile => "credentials file",
            ApiKeySource::ConfigFile => "config file",
        }
    }
}

/// Trimmed value, None when blank
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_omdb_api_key(&self) -> Option<&String> {
        self.get(OMDB_API_KEY).filter(|k| !k.trim().is_empty())
    }

    pub fn set_omdb_api_key(&mut self, key: String) {
        self.set(OMDB_API_KEY.to_string(), key);
    }

    /// Resolve the API key: environment variable, then this store, then the config fallback
    pub fn resolve_api_key(&self, config_fallback: Option<&str>) -> Option<String> {
        self.resolve_api_key_source(config_fallback).map(|(_, key)| key)
    }

    /// Same order as `resolve_api_key`, also reporting where the key came from
    pub fn resolve_api_key_source(&self, config_fallback: Option<&str>) -> Option<(ApiKeySource, String)> {
        let env_value = std::env::var(API_KEY_ENV).ok();
        self.resolve_from(env_value.as_deref(), config_fallback)
    }

    // Blank values at any step fall through to the next one
    fn resolve_from(&self, env_value: Option<&str>, config_fallback: Option<&str>) -> Option<(ApiKeySource, String)> {
        env_value
            .and_then(non_blank)
            .map(|k| (ApiKeySource::Environment, k))
            .or_else(|| {
                self.get(OMDB_API_KEY)
                    .and_then(|k| non_blank(k))
                    .map(|k| (ApiKeySource::CredentialsFile, k))
            })
            .or_else(|| {
                config_fallback
                    .and_then(non_blank)
                    .map(|k| (ApiKeySource::ConfigFile, k))
            })
    }
}
