//! Configuration types.
//!
//! Configuration is layered: built-in defaults, then `/etc/cdnmon/config.toml`,
//! then the user config file, then environment variables. The API base URL is
//! normally supplied through the environment and is read once at startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::filter::{DEFAULT_LIMIT, DEFAULT_SORT, PAGE_SIZES, SortKey};

/// Environment variable holding the API base URL
pub const BASE_URL_ENV: &str = "CDNMON_BASE_API_URL";

/// Base URL variable used by the web dashboard deployment, accepted as a fallback
pub const LEGACY_BASE_URL_ENV: &str = "NEXT_PUBLIC_BASE_API_URL";

/// Theme override
pub const THEME_ENV: &str = "CDNMON_THEME";

/// Makes config problems fatal instead of warnings
pub const STRICT_ENV: &str = "CDNMON_STRICT_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Invalid(String),

    #[error("no API base URL configured (set CDNMON_BASE_API_URL or api.base_url)")]
    MissingBaseUrl,
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,

    pub display: DisplayConfig,

    pub cache: CacheConfig,
}

/// Remote listing endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; `/distributions` is appended
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Theme name ("dark" or "light")
    pub theme: String,

    /// Initial page size (10, 20 or 50)
    pub default_limit: u32,

    /// Initial sort token
    pub default_sort: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            default_limit: DEFAULT_LIMIT,
            default_sort: DEFAULT_SORT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of filter states kept in the page cache
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 64 }
    }
}

/// Apply a correction or fail, depending on strict mode.
fn correct_or_fail(
    msg: String,
    default_display: &str,
    strict: bool,
    warnings: &mut Vec<String>,
) -> Result<(), ConfigError> {
    if strict {
        return Err(ConfigError::Invalid(msg));
    }
    warnings.push(format!("{msg} - using default ({default_display})"));
    Ok(())
}

impl Config {
    /// Validate values, correcting invalid ones to defaults.
    ///
    /// Returns the warnings for corrected values. In strict mode the first
    /// invalid value is returned as an error instead.
    pub fn validate(&mut self, strict: bool) -> Result<Vec<String>, ConfigError> {
        let mut warnings = Vec::new();
        let api_defaults = ApiConfig::default();
        let display_defaults = DisplayConfig::default();
        let cache_defaults = CacheConfig::default();

        if self.api.timeout_secs == 0 {
            correct_or_fail(
                "api.timeout_secs must be at least 1 second(s), got 0".to_string(),
                &api_defaults.timeout_secs.to_string(),
                strict,
                &mut warnings,
            )?;
            self.api.timeout_secs = api_defaults.timeout_secs;
        }

        if !PAGE_SIZES.contains(&self.display.default_limit) {
            correct_or_fail(
                format!(
                    "display.default_limit must be one of {:?}, got {}",
                    PAGE_SIZES, self.display.default_limit
                ),
                &display_defaults.default_limit.to_string(),
                strict,
                &mut warnings,
            )?;
            self.display.default_limit = display_defaults.default_limit;
        }

        if SortKey::from_token(&self.display.default_sort).is_none() {
            correct_or_fail(
                format!(
                    "display.default_sort '{}' is not a known sort token",
                    self.display.default_sort
                ),
                &display_defaults.default_sort,
                strict,
                &mut warnings,
            )?;
            self.display.default_sort = display_defaults.default_sort;
        }

        if self.cache.max_entries == 0 {
            correct_or_fail(
                "cache.max_entries must be at least 1, got 0".to_string(),
                &cache_defaults.max_entries.to_string(),
                strict,
                &mut warnings,
            )?;
            self.cache.max_entries = cache_defaults.max_entries;
        }

        Ok(warnings)
    }

    /// Get the user config file path, respecting XDG_CONFIG_HOME
    ///
    /// Resolution order:
    /// 1. $XDG_CONFIG_HOME/cdnmon/config.toml (if XDG_CONFIG_HOME is set)
    /// 2. $HOME/.config/cdnmon/config.toml (if HOME is set)
    /// 3. dirs::config_dir()/cdnmon/config.toml
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return Some(PathBuf::from(xdg_config).join("cdnmon/config.toml"));
        }

        if let Some(home) = std::env::var_os("HOME") {
            return Some(PathBuf::from(home).join(".config/cdnmon/config.toml"));
        }

        dirs::config_dir().map(|dir| dir.join("cdnmon/config.toml"))
    }

    /// Load configuration from files and environment.
    /// Returns the config and any warnings encountered during loading.
    pub fn load() -> Result<(Self, Vec<String>), ConfigError> {
        let strict = Self::is_strict_mode();
        let mut paths = vec![PathBuf::from("/etc/cdnmon/config.toml")];
        if let Some(user_path) = Self::user_config_path() {
            paths.push(user_path);
        }

        Self::load_from(&paths, strict, |key| std::env::var(key).ok())
    }

    /// Load from explicit paths with an injectable environment lookup
    pub fn load_from(
        paths: &[PathBuf],
        strict: bool,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, Vec<String>), ConfigError> {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        for path in paths {
            if let Err(e) = Self::load_config_file(&mut config, path) {
                if strict {
                    return Err(e);
                }
                warnings.push(e.to_string());
            }
        }

        config.apply_env_overrides(env);
        warnings.extend(config.validate(strict)?);

        Ok((config, warnings))
    }

    fn is_strict_mode() -> bool {
        std::env::var(STRICT_ENV)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Merge one config file into `config`. A missing file is not an error.
    fn load_config_file(config: &mut Self, path: &Path) -> Result<(), ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let parsed = toml::from_str::<Config>(&content).map_err(|source| {
                    ConfigError::Parse {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                config.merge(parsed);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn merge(&mut self, other: Config) {
        // A later file without base_url keeps the earlier one
        self.api.base_url = other.api.base_url.or(self.api.base_url.take());
        self.api.timeout_secs = other.api.timeout_secs;
        self.display = other.display;
        self.cache = other.cache;
    }

    fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        let base_url = env(BASE_URL_ENV)
            .filter(|v| !v.is_empty())
            .or_else(|| env(LEGACY_BASE_URL_ENV).filter(|v| !v.is_empty()));
        if let Some(url) = base_url {
            self.api.base_url = Some(url);
        }

        if let Some(theme) = env(THEME_ENV).filter(|v| !v.is_empty()) {
            self.display.theme = theme;
        }
    }

    /// The configured base URL without trailing slashes
    pub fn base_url(&self) -> Result<&str, ConfigError> {
        self.api
            .base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cdnmon-test-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.display.default_limit, 10);
        assert_eq!(config.display.default_sort, "-created_at");
        assert_eq!(config.cache.max_entries, 64);
        assert!(matches!(config.base_url(), Err(ConfigError::MissingBaseUrl)));
    }

    #[test]
    fn test_env_base_url_wins_over_file() {
        let path = temp_config(
            "env-wins",
            "[api]\nbase_url = \"http://file.example\"\n",
        );
        let (config, warnings) = Config::load_from(
            &[path],
            false,
            env_from(&[(BASE_URL_ENV, "http://env.example/api/")]),
        )
        .unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config.base_url().unwrap(), "http://env.example/api");
    }

    #[test]
    fn test_legacy_env_fallback() {
        let (config, _) = Config::load_from(
            &[],
            false,
            env_from(&[(LEGACY_BASE_URL_ENV, "http://legacy.example")]),
        )
        .unwrap();
        assert_eq!(config.base_url().unwrap(), "http://legacy.example");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let missing = std::env::temp_dir().join("cdnmon-definitely-missing/config.toml");
        let (_, warnings) = Config::load_from(&[missing], true, env_from(&[])).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_invalid_values_corrected_with_warnings() {
        let path = temp_config(
            "invalid",
            "[display]\ndefault_limit = 15\ndefault_sort = \"size\"\n[cache]\nmax_entries = 0\n",
        );
        let (config, warnings) = Config::load_from(&[path], false, env_from(&[])).unwrap();
        assert_eq!(config.display.default_limit, 10);
        assert_eq!(config.display.default_sort, "-created_at");
        assert_eq!(config.cache.max_entries, 64);
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn test_strict_mode_rejects_invalid_values() {
        let path = temp_config("strict", "[api]\ntimeout_secs = 0\n");
        let result = Config::load_from(&[path], true, env_from(&[]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_error_becomes_warning() {
        let path = temp_config("parse", "[api\nbase_url = ");
        let (_, warnings) = Config::load_from(&[path], false, env_from(&[])).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("failed to parse"));
    }
}
