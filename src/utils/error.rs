use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Backend responded with status {status}: {detail}")]
    StatusError { status: u16, detail: String },

    #[error("Email already in use.")]
    EmailExists,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error on '{field}': {message}")]
    ValidationError { field: String, message: String },
}

impl ApiError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// HTTP status the backend answered with, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::StatusError { status, .. } => Some(*status),
            Self::EmailExists => Some(400),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(e) if e.is_timeout() => "後端服務回應逾時".to_string(),
            Self::HttpError(_) => "無法連線到後端服務".to_string(),
            Self::StatusError { detail, .. } => detail.clone(),
            Self::ValidationError { message, .. } => message.clone(),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                format!("設定錯誤: {}", self)
            }
            other => other.to_string(),
        }
    }

    /// CLI exit code: 1 invalid input or config, 2 backend rejected, 3 transport or decode failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ValidationError { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::UrlError(_)
            | Self::IoError(_) => 1,
            Self::StatusError { .. } | Self::EmailExists => 2,
            Self::HttpError(_) | Self::SerializationError(_) => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
