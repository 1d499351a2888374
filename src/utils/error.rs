use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("Model response was not a usable plan: {message}")]
    LlmResponseError { message: String },

    #[error("No API key configured")]
    MissingApiKey,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("PDF rendering error: {message}")]
    PdfError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Session error: {message}")]
    SessionError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Model,
    Storage,
    Configuration,
    Input,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::ApiStatusError { .. } => ErrorCategory::Network,
            Self::LlmResponseError { .. } | Self::MissingApiKey => ErrorCategory::Model,
            Self::IoError(_) | Self::SerializationError(_) | Self::SessionError { .. } => {
                ErrorCategory::Storage
            }
            Self::PdfError { .. } => ErrorCategory::Rendering,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 這些錯誤在規劃流程中會觸發本地備援計畫
            Self::MissingApiKey | Self::LlmResponseError { .. } => ErrorSeverity::Low,
            Self::ApiError(_) | Self::ApiStatusError { .. } => ErrorSeverity::Medium,
            Self::ValidationError { .. }
            | Self::SessionError { .. }
            | Self::PdfError { .. }
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ApiError(_) => "Check your network connection and the configured base_url".to_string(),
            Self::ApiStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Check that OPENAI_API_KEY is valid".to_string()
            }
            Self::ApiStatusError { status, .. } if *status == 429 => {
                "Rate limited; wait a moment or use --offline".to_string()
            }
            Self::ApiStatusError { .. } => "Retry later or use --offline".to_string(),
            Self::LlmResponseError { .. } => {
                "Run the command again; the local template plan is always available with --offline"
                    .to_string()
            }
            Self::MissingApiKey => {
                "Set OPENAI_API_KEY or [llm].api_key in planner.toml".to_string()
            }
            Self::IoError(_) => "Check that the state directory exists and is writable".to_string(),
            Self::SerializationError(_) => {
                "The session file looks corrupted; generate a new plan".to_string()
            }
            Self::PdfError { .. } => "Try exporting JSON instead with --json".to_string(),
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix planner.toml and run again".to_string(),
            Self::ValidationError { .. } => "Adjust the command arguments and run again".to_string(),
            Self::SessionError { .. } => "Generate a plan first with `agentic-planner plan`".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } | Self::SessionError { message } => message.clone(),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
