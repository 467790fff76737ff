use crate::domain::model::ResponseMode;
use crate::utils::error::{MatchError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub profiles: ProfilesConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: Option<String>,
    pub api_base: Option<String>,
    pub response_format: Option<ResponseMode>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilesConfig {
    pub path: Option<String>,
}

impl TomlConfig {
    /// Loads the config file, expanding `${VAR}` references first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MatchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MatchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MatchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[model]
name = "gpt-4.1-mini"
api_base = "https://llm.example.com/v1"
response_format = "json_object"
timeout_seconds = 30

[profiles]
path = "./data/doctors.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.model.name.as_deref(), Some("gpt-4.1-mini"));
        assert_eq!(config.model.response_format, Some(ResponseMode::JsonObject));
        assert_eq!(config.model.timeout_seconds, Some(30));
        assert_eq!(config.profiles.path.as_deref(), Some("./data/doctors.json"));
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.model.name.is_none());
        assert!(config.profiles.path.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DOCTOR_MATCH_TEST_BASE", "https://proxy.example.com/v1");

        let config = TomlConfig::from_toml_str(
            r#"
[model]
api_base = "${DOCTOR_MATCH_TEST_BASE}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.model.api_base.as_deref(),
            Some("https://proxy.example.com/v1")
        );

        std::env::remove_var("DOCTOR_MATCH_TEST_BASE");
    }

    #[test]
    fn test_unknown_response_format_is_rejected() {
        let err = TomlConfig::from_toml_str(
            r#"
[model]
response_format = "text"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, MatchError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[profiles]\npath = \"./volunteers.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.profiles.path.as_deref(), Some("./volunteers.json"));
    }
}
