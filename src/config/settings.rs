use crate::config::toml_config::TomlConfig;
use crate::domain::model::ResponseMode;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_range,
    validate_url, Validate,
};
use std::path::Path;

pub const DEFAULT_MODEL: &str = "gpt-4.1-nano-2025-04-14";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_PROFILES_PATH: &str = "./profiles.json";

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Loads `KEY=value` pairs from an env file, overriding variables that are
/// already set. Returns `false` when the file does not exist.
pub fn load_env_file(path: &Path) -> Result<bool> {
    match dotenvy::from_path_override(path) {
        Ok(()) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Ok(true)
        }
        Err(e) if e.not_found() => {
            tracing::debug!("No env file at {}, using process environment", path.display());
            Ok(false)
        }
        Err(e) => Err(MatchError::ConfigValidationError {
            field: "env_file".to_string(),
            message: format!("{}: {}", path.display(), e),
        }),
    }
}

/// The API key is only ever read from the environment.
pub fn api_key_from_env() -> Result<String> {
    match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(MatchError::MissingConfigError {
            field: API_KEY_VAR.to_string(),
        }),
    }
}

/// Resolved settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model: String,
    pub api_base: String,
    pub profiles_path: String,
    pub response_mode: ResponseMode,
    pub timeout_seconds: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            profiles_path: DEFAULT_PROFILES_PATH.to_string(),
            response_mode: ResponseMode::default(),
            timeout_seconds: None,
        }
    }
}

impl Settings {
    /// Defaults, with `OPENAI_BASE_URL` taking the place of the public endpoint.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(base) = std::env::var(BASE_URL_VAR) {
            if !base.trim().is_empty() {
                settings.api_base = base;
            }
        }
        settings
    }

    pub fn apply_toml(mut self, config: &TomlConfig) -> Self {
        if let Some(name) = &config.model.name {
            self.model = name.clone();
        }
        if let Some(api_base) = &config.model.api_base {
            self.api_base = api_base.clone();
        }
        if let Some(mode) = config.model.response_format {
            self.response_mode = mode;
        }
        if config.model.timeout_seconds.is_some() {
            self.timeout_seconds = config.model.timeout_seconds;
        }
        if let Some(path) = &config.profiles.path {
            self.profiles_path = path.clone();
        }
        self
    }
}

impl ConfigProvider for Settings {
    fn model(&self) -> &str {
        &self.model
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn profiles_path(&self) -> &str {
        &self.profiles_path
    }

    fn response_mode(&self) -> ResponseMode {
        self.response_mode
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("model.name", &self.model)?;
        validate_url("model.api_base", &self.api_base)?;
        validate_path("profiles.path", &self.profiles_path)?;
        validate_file_extension("profiles.path", &self.profiles_path, &["json"])?;

        if let Some(timeout) = self.timeout_seconds {
            validate_range("model.timeout_seconds", timeout, 1, 600)?;
        }

        Ok(())
    }
}
