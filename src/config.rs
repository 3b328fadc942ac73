//! Configuration module for the viewer.
//! Settings come from an INI-style `config.ini` with built-in defaults;
//! everything is read once at startup and fixed for the session.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

const DEFAULT_CONFIG_INI: &str = include_str!("../config.ini");

/// Deployment mode controlling the list-fetch fallback behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Fall back to the built-in sample feed when the endpoint is unreachable.
    Development,
    /// Degrade to an empty feed instead of showing sample items.
    Production,
}

impl Environment {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Viewer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint returning a JSON array of `{url, type, id}` items.
    pub api_endpoint: String,
    /// Number of items to request per fetch.
    pub fetch_limit: usize,
    /// Deployment mode.
    pub environment: Environment,
    /// Minimum vertical drag distance (logical points) to register a swipe.
    pub min_swipe_distance: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_endpoint: "http://localhost:8000/api/random-media".to_string(),
            fetch_limit: 10,
            environment: Environment::Development,
            min_swipe_distance: 50.0,
        }
    }
}

impl Config {
    /// Get the settings file path: `config.ini` in the user config directory,
    /// falling back to the executable's directory.
    pub fn config_path() -> Option<PathBuf> {
        if let Some(dirs) = directories::ProjectDirs::from("", "", "swipe-viewer") {
            let _ = fs::create_dir_all(dirs.config_dir());
            return Some(dirs.config_dir().join("config.ini"));
        }
        let exe = std::env::current_exe().ok()?;
        Some(exe.parent()?.join("config.ini"))
    }

    /// Load configuration, writing the default template on first run.
    pub fn load() -> Self {
        let Some(config_path) = Self::config_path() else {
            return Self::parse_ini(DEFAULT_CONFIG_INI);
        };

        if !config_path.exists() {
            if let Err(e) = fs::write(&config_path, DEFAULT_CONFIG_INI) {
                warn!("Could not write config template to {:?}: {}", config_path, e);
            }
            return Self::parse_ini(DEFAULT_CONFIG_INI);
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => Self::parse_ini(&content),
            Err(e) => {
                warn!("Could not read {:?}: {}", config_path, e);
                Self::parse_ini(DEFAULT_CONFIG_INI)
            }
        }
    }

    /// Parse INI content into Config. Unknown keys and bad values keep the defaults.
    pub fn parse_ini(content: &str) -> Self {
        let mut config = Config::default();

        let mut in_source_section = false;
        let mut in_input_section = false;

        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            // Check for section headers
            if line.starts_with('[') && line.ends_with(']') {
                let section = &line[1..line.len() - 1];
                in_source_section = section.eq_ignore_ascii_case("source");
                in_input_section = section.eq_ignore_ascii_case("input");
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            if in_source_section {
                match key.as_str() {
                    "api_endpoint" | "endpoint" => {
                        if !value.is_empty() {
                            config.api_endpoint = value.to_string();
                        }
                    }
                    "fetch_limit" => {
                        if let Ok(v) = value.parse::<usize>() {
                            config.fetch_limit = v.max(1);
                        }
                    }
                    "environment" | "mode" => {
                        if let Some(env) = Environment::from_str(value) {
                            config.environment = env;
                        } else {
                            warn!("Unknown environment '{}', keeping default", value);
                        }
                    }
                    _ => {}
                }
            }

            if in_input_section {
                if key.as_str() == "min_swipe_distance" {
                    if let Ok(v) = value.parse::<f32>() {
                        config.min_swipe_distance = v.max(0.0);
                    }
                }
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_matches_built_in_defaults() {
        let config = Config::parse_ini(DEFAULT_CONFIG_INI);
        let defaults = Config::default();
        assert_eq!(config.api_endpoint, defaults.api_endpoint);
        assert_eq!(config.fetch_limit, defaults.fetch_limit);
        assert_eq!(config.environment, defaults.environment);
        assert_eq!(config.min_swipe_distance, defaults.min_swipe_distance);
    }

    #[test]
    fn parse_ini_reads_all_sections() {
        let config = Config::parse_ini(
            "[source]\n\
             api_endpoint = https://feed.example/media\n\
             fetch_limit = 25\n\
             environment = production\n\
             [input]\n\
             min_swipe_distance = 80\n",
        );
        assert_eq!(config.api_endpoint, "https://feed.example/media");
        assert_eq!(config.fetch_limit, 25);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.min_swipe_distance, 80.0);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = Config::parse_ini(
            "[source]\n\
             fetch_limit = lots\n\
             environment = staging\n\
             [input]\n\
             min_swipe_distance = -3\n",
        );
        let defaults = Config::default();
        assert_eq!(config.fetch_limit, defaults.fetch_limit);
        assert_eq!(config.environment, defaults.environment);
        assert_eq!(config.min_swipe_distance, 0.0);
    }

    #[test]
    fn keys_outside_sections_are_ignored() {
        let config = Config::parse_ini("api_endpoint = https://nowhere.example\n");
        assert_eq!(config.api_endpoint, Config::default().api_endpoint);
    }
}
