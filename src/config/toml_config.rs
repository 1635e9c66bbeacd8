use crate::domain::model::CasingPolicy;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub casing: CasingPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: None,
            headers: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl TomlConfig {
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            casing: CasingPolicy::default(),
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ApiError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ApiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("api.base_url", &self.api.base_url)?;

        if let Some(timeout) = self.api.timeout_seconds {
            crate::utils::validation::validate_range("api.timeout_seconds", timeout, 1, 300)?;
        }

        crate::utils::validation::validate_positive_number(
            "casing.max_depth",
            self.casing.max_depth,
            1,
        )?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Depth;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[api]
base_url = "https://api.example.com"
timeout_seconds = 10
headers = { "User-Agent" = "storefront-api/0.1" }

[casing]
camel_depth = "top_level"
null_empty_strings = "recursive"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(
            config.api.headers.as_ref().unwrap().get("User-Agent").unwrap(),
            "storefront-api/0.1"
        );
        assert_eq!(config.casing.camel_depth, Depth::TopLevel);
        assert_eq!(config.casing.snake_depth, Depth::Recursive);
        assert_eq!(config.casing.null_empty_strings, Depth::Recursive);
        assert_eq!(config.casing.max_depth, 128);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_casing_section_optional() {
        let config = TomlConfig::from_toml_str("[api]\nbase_url = \"http://localhost:8000\"\n").unwrap();
        assert_eq!(config.casing, CasingPolicy::default());
        assert_eq!(config.api.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STOREFRONT_TEST_API_URL", "https://backend.test");

        let toml_content = r#"
[api]
base_url = "${STOREFRONT_TEST_API_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://backend.test");

        std::env::remove_var("STOREFRONT_TEST_API_URL");
    }

    #[test]
    fn test_unset_env_var_left_in_place() {
        let toml_content = r#"
[api]
base_url = "${STOREFRONT_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "${STOREFRONT_TEST_UNSET_VARIABLE}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[api]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(config.validate().is_err());

        let mut config = TomlConfig::new(ApiConfig::new("http://localhost:8000"));
        config.api.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        let mut config = TomlConfig::new(ApiConfig::new("http://localhost:8000"));
        config.casing.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[api\nbase_url = 1").unwrap_err();
        assert!(matches!(err, ApiError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[api]
base_url = "https://api.example.com"

[casing]
max_depth = 16
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.casing.max_depth, 16);
    }
}
