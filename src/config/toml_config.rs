use crate::core::ConfigProvider;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "planner.toml";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.6;
pub const DEFAULT_MAX_TOKENS: u32 = 900;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_STATE_DIR: &str = "./planner";
pub const DEFAULT_PDF_FILENAME: &str = "agentic_plan.pdf";
pub const DEFAULT_JSON_FILENAME: &str = "agentic_plan.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub state_dir: Option<String>,
    pub pdf_filename: Option<String>,
    pub json_filename: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when given, otherwise `planner.toml` in the working
    /// directory if it exists, otherwise defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OPENAI_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("llm.base_url", self.base_url())?;
        validation::validate_non_empty_string("llm.model", self.model())?;
        validation::validate_range("llm.temperature", self.temperature(), 0.0, 2.0)?;
        validation::validate_positive_number("llm.max_tokens", self.max_tokens(), 1)?;
        validation::validate_path("output.state_dir", self.state_dir())?;
        validation::validate_non_empty_string("output.pdf_filename", self.pdf_filename())?;
        validation::validate_non_empty_string("output.json_filename", self.json_filename())?;

        if let Some(level) = &self.logging.level {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.as_str()) {
                return Err(PlannerError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn state_dir(&self) -> &str {
        self.output.state_dir.as_deref().unwrap_or(DEFAULT_STATE_DIR)
    }

    pub fn pdf_filename(&self) -> &str {
        self.output.pdf_filename.as_deref().unwrap_or(DEFAULT_PDF_FILENAME)
    }

    pub fn json_filename(&self) -> &str {
        self.output.json_filename.as_deref().unwrap_or(DEFAULT_JSON_FILENAME)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }

    pub fn log_json(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }
}

/// A configured key that still reads `${VAR}` had no value in the environment.
fn usable_key(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || (value.starts_with("${") && value.ends_with('}')) {
        None
    } else {
        Some(value.to_string())
    }
}

/// `[llm].api_key` first, then the `OPENAI_API_KEY` value.
fn resolve_api_key(configured: Option<&str>, env_value: Option<&str>) -> Option<String> {
    configured
        .and_then(usable_key)
        .or_else(|| env_value.and_then(usable_key))
}

impl ConfigProvider for TomlConfig {
    fn model(&self) -> &str {
        self.llm.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn base_url(&self) -> &str {
        self.llm.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn api_key(&self) -> Option<String> {
        let env_value = std::env::var(API_KEY_ENV).ok();
        resolve_api_key(self.llm.api_key.as_deref(), env_value.as_deref())
    }

    fn temperature(&self) -> f32 {
        self.llm.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    fn max_tokens(&self) -> u32 {
        self.llm.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
