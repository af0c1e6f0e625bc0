use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

use crate::providers::completions::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};

const ENV_PREFIX: &str = "PARLEY";

pub fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .map(|h| h.join("Library/Application Support/parley"))
    }

    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
            .map(|c| c.join("parley"))
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .map(|a| a.join("parley"))
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .map(|h| h.join(".config/parley"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: String,
    pub base_url: String,
    pub api_key_env: String,
    pub connect_timeout_secs: u64,
    pub strict_status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            connect_timeout_secs: 30,
            strict_status: false,
            log_file: None,
        }
    }
}

/// Values given on the command line; each one wins over file and env.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub strict_status: bool,
}

impl AppConfig {
    /// Loads the default config file (if any) and `PARLEY_*` variables,
    /// falling back to defaults with a warning when either is malformed.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(Self::get_config_path().as_deref()).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {e}");
            Self::default()
        })
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        builder.build()?.try_deserialize()
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if overrides.log_file.is_some() {
            self.log_file = overrides.log_file;
        }
        if overrides.strict_status {
            self.strict_status = true;
        }
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        get_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Effective settings as TOML, for `config show`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn init_default() -> Result<PathBuf, io::Error> {
        let path = Self::get_config_path().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        Self::write_template(&path)?;
        Ok(path)
    }

    pub fn write_template(path: &Path) -> Result<(), io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {}", path.display()),
            ));
        }

        fs::write(path, include_str!("config.template.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_target_openai() {
        let config = AppConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
        assert!(!config.strict_status);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.base_url, AppConfig::default().base_url);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "model = \"gpt-4o-mini\"\nbase_url = \"http://localhost:11434\"\nstrict_status = true\nconnect_timeout_secs = 5\n",
        )
        .unwrap();

        let config = AppConfig::load_from(Some(&path)).unwrap();

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "http://localhost:11434");
        assert!(config.strict_status);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("config.toml");

        AppConfig::write_template(&path).unwrap();
        let config = AppConfig::load_from(Some(&path)).unwrap();

        assert_eq!(config.model, AppConfig::default().model);
        assert_eq!(
            config.connect_timeout_secs,
            AppConfig::default().connect_timeout_secs
        );
    }

    #[test]
    fn test_template_refuses_to_overwrite() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "model = \"mine\"\n").unwrap();

        let err = AppConfig::write_template(&path).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&path).unwrap(), "model = \"mine\"\n");
    }

    #[test]
    fn test_overrides_win() {
        let mut config = AppConfig::default();
        config.apply_overrides(ConfigOverrides {
            model: Some("gpt-4o".into()),
            base_url: None,
            log_file: Some(PathBuf::from("/tmp/p.log")),
            strict_status: true,
        });

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/p.log")));
        assert!(config.strict_status);
    }

    #[test]
    fn test_show_never_contains_a_key_value() {
        let toml = AppConfig::default().to_toml().unwrap();
        assert!(toml.contains("model = \"gpt-3.5-turbo\""));
        assert!(toml.contains("api_key_env = \"OPENAI_API_KEY\""));
        assert!(!toml.contains("log_file"));
    }
}
