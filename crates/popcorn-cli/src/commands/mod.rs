pub mod config;
pub mod loading;
pub mod lookup;
pub mod prompts;
pub mod session;
pub mod star_prompt;

use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use popcorn_config::{Config, CredentialStore, PathManager, API_KEY_ENV};
use popcorn_core::{SearchFlow, StarRatingConfig};
use popcorn_sources::{MovieProvider, OmdbClient, OmdbSettings};
use std::sync::Arc;
use std::time::Duration;

/// Load the config file (defaults when absent) and validate it
pub fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
    Ok(config)
}

/// Build the OMDb provider from explicit configuration and stored credentials
pub fn build_provider(config: &Config, path_manager: &PathManager) -> Result<Arc<dyn MovieProvider>> {
    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let api_key = cred_store
        .resolve_api_key(config.provider.api_key.as_deref())
        .ok_or_else(|| {
            eyre!(
                "No OMDb API key configured. Run 'popcorn config api-key' or set {}",
                API_KEY_ENV
            )
        })?;

    let mut settings = OmdbSettings::new(config.provider.base_url.clone(), api_key);
    if let Some(secs) = config.provider.timeout_secs {
        settings = settings.with_timeout(Duration::from_secs(secs));
    }

    let client = OmdbClient::new(settings).wrap_err("Failed to create OMDb client")?;
    tracing::debug!(base_url = %client.base_url(), "OMDb client ready");
    Ok(Arc::new(client))
}

/// Config, provider and a fresh session flow
pub fn build_flow() -> Result<(Config, SearchFlow)> {
    let path_manager = PathManager::default();
    let config = load_config(&path_manager)?;
    let provider = build_provider(&config, &path_manager)?;
    let flow = SearchFlow::new(provider, StarRatingConfig::from(&config.rating))
        .wrap_err("Invalid rating configuration")?;
    Ok((config, flow))
}
