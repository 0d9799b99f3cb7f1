use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OMDB_URL: &str = "https://www.omdbapi.com/";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub rating: RatingConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Fallback only; the credentials file and POPCORN_OMDB_API_KEY take precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Settings for the star rating shown in the detail view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingConfig {
    #[serde(default = "default_max_rating")]
    pub max_rating: u8,
    #[serde(default = "default_icon_size")]
    pub icon_size: u16,
    #[serde(default = "default_active_color")]
    pub active_color: String,
    #[serde(default = "default_inactive_color")]
    pub inactive_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_initial_query")]
    pub initial_query: String,
}

fn default_base_url() -> String {
    DEFAULT_OMDB_URL.to_string()
}

fn default_max_rating() -> u8 {
    10
}

fn default_icon_size() -> u16 {
    24
}

fn default_active_color() -> String {
    "#fcc419".to_string()
}

fn default_inactive_color() -> String {
    "#495057".to_string()
}

fn default_initial_query() -> String {
    "interstellar".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            max_rating: default_max_rating(),
            icon_size: default_icon_size(),
            active_color: default_active_color(),
            inactive_color: default_inactive_color(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_query: default_initial_query(),
        }
    }
}

/// Parse a `#rrggbb` colour into its components
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.provider.base_url.trim();
        if base_url.is_empty() {
            return Err(anyhow::anyhow!("provider.base_url cannot be empty"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "provider.base_url must start with http:// or https://, got {}",
                base_url
            ));
        }

        if self.provider.timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("provider.timeout_secs must be greater than zero"));
        }

        if self.rating.max_rating == 0 {
            return Err(anyhow::anyhow!("rating.max_rating must be at least 1"));
        }

        for (name, value) in [
            ("rating.active_color", &self.rating.active_color),
            ("rating.inactive_color", &self.rating.inactive_color),
        ] {
            if parse_hex_color(value).is_none() {
                return Err(anyhow::anyhow!("{} must be a #rrggbb colour, got {}", name, value));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            provider: ProviderConfig {
                base_url: "http://localhost:8080/".to_string(),
                api_key: Some("test_key".to_string()),
                timeout_secs: Some(5),
            },
            rating: RatingConfig {
                max_rating: 5,
                ..RatingConfig::default()
            },
            session: SessionConfig {
                initial_query: "alien".to_string(),
            },
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.provider.base_url, "http://localhost:8080/");
        assert_eq!(loaded.provider.api_key.as_deref(), Some("test_key"));
        assert_eq!(loaded.provider.timeout_secs, Some(5));
        assert_eq!(loaded.rating.max_rating, 5);
        assert_eq!(loaded.rating.icon_size, 24);
        assert_eq!(loaded.session.initial_query, "alien");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[rating]\nmax_rating = 7\n").unwrap();
        assert_eq!(config.provider.base_url, DEFAULT_OMDB_URL);
        assert!(config.provider.api_key.is_none());
        assert_eq!(config.rating.max_rating, 7);
        assert_eq!(config.rating.active_color, "#fcc419");
        assert_eq!(config.session.initial_query, "interstellar");
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.rating.max_rating, 10);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.rating.max_rating = 0;
        assert!(config.validate().is_err());
        config.rating.max_rating = 10;

        config.provider.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
        config.provider.base_url = DEFAULT_OMDB_URL.to_string();

        config.rating.active_color = "gold".to_string();
        assert!(config.validate().is_err());
        config.rating.active_color = "#fcc419".to_string();

        config.provider.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#fcc419"), Some((0xfc, 0xc4, 0x19)));
        assert_eq!(parse_hex_color("#FFFFFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("fcc419"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }
}
