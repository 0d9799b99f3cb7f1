use super::prompts;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use popcorn_config::{Config, CredentialStore, PathManager, API_KEY_ENV};
use serde_json::json;

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output).await,
        crate::ConfigCommands::Init { force } => init_config(force, output).await,
        crate::ConfigCommands::ApiKey { key } => configure_api_key(key, output).await,
    }
}

fn section_table(title: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

async fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let credentials_file = path_manager.credentials_file();

    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let api_key = store
        .resolve_api_key_source(config.provider.api_key.as_deref())
        .map(|(source, key)| (source.describe(), key));
    let api_key_display = match &api_key {
        Some((_, key)) if full => key.clone(),
        Some((_, key)) => mask_string(key),
        None => "<not set>".to_string(),
    };
    let timeout_display = config
        .provider
        .timeout_secs
        .map(|s| format!("{} seconds", s))
        .unwrap_or_else(|| "none".to_string());

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !config_file.exists() {
                output.warn(format!(
                    "Configuration file not found at {}, showing defaults. Run 'popcorn config init' to create it.",
                    config_file.display()
                ));
                println!();
            }

            let mut files_table = section_table("Files");
            files_table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display().to_string())]);
            files_table.add_row(vec![
                Cell::new("Credentials File"),
                Cell::new(credentials_file.display().to_string()),
            ]);
            println!("{}", files_table);
            println!();

            let mut provider_table = section_table("Provider (OMDb)");
            provider_table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.provider.base_url)]);
            provider_table.add_row(vec![Cell::new("API Key"), Cell::new(&api_key_display)]);
            provider_table.add_row(vec![
                Cell::new("API Key Source"),
                Cell::new(api_key.as_ref().map(|(source, _)| *source).unwrap_or("-")),
            ]);
            provider_table.add_row(vec![Cell::new("Timeout"), Cell::new(&timeout_display)]);
            println!("{}", provider_table);
            println!();

            let mut rating_table = section_table("Rating Widget");
            rating_table.add_row(vec![Cell::new("Max Rating"), Cell::new(config.rating.max_rating)]);
            rating_table.add_row(vec![Cell::new("Icon Size"), Cell::new(config.rating.icon_size)]);
            rating_table.add_row(vec![Cell::new("Active Color"), Cell::new(&config.rating.active_color)]);
            rating_table.add_row(vec![Cell::new("Inactive Color"), Cell::new(&config.rating.inactive_color)]);
            println!("{}", rating_table);
            println!();

            let mut session_table = section_table("Session");
            session_table.add_row(vec![Cell::new("Initial Query"), Cell::new(&config.session.initial_query)]);
            println!("{}", session_table);

            if api_key.is_none() {
                println!();
                println!(
                    "{}",
                    format!("No API key yet. Run 'popcorn config api-key' or set {}.", API_KEY_ENV).bright_black()
                );
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "config_file_exists": config_file.exists(),
                "credentials_file": credentials_file.display().to_string(),
                "provider": {
                    "base_url": config.provider.base_url,
                    "api_key": api_key.as_ref().map(|_| api_key_display.clone()),
                    "api_key_source": api_key.as_ref().map(|(source, _)| *source),
                    "timeout_secs": config.provider.timeout_secs,
                },
                "rating": config.rating,
                "session": config.session,
            }));
        }
    }

    Ok(())
}

async fn init_config(force: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;

    let config_file = path_manager.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {}. Use --force to overwrite it.",
            config_file.display()
        ));
        return Ok(());
    }

    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    tracing::info!(path = %config_file.display(), "Default configuration written");
    output.success(format!("Configuration written to {}", config_file.display()));
    Ok(())
}

async fn configure_api_key(key_arg: Option<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;

    let key = match key_arg {
        Some(key) => key,
        None => {
            output.println("Get a free key at https://www.omdbapi.com/apikey.aspx");
            prompts::prompt_password("OMDb API key")?
        }
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    let credentials_file = path_manager.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    if store.get_omdb_api_key().is_some()
        && output.is_human()
        && super::loading::is_interactive()
        && !prompts::prompt_yes_no("Replace the stored API key?", Some(true))?
    {
        output.info("Kept the existing API key");
        return Ok(());
    }

    store.set_omdb_api_key(key.clone());
    store
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;

    output.success(format!(
        "API key {} saved to {}",
        mask_string(&key),
        credentials_file.display()
    ));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
