use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Invalid arguments: {message}")]
    ArgumentError { message: String },

    #[error("Tracking service request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Tracking service did not answer within {seconds}s")]
    TimeoutError { seconds: u64 },

    #[error("Unexpected response format: {message}")]
    FormatError { message: String },

    #[error("Invalid event date '{value}': {source}")]
    DateParseError {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TrackError>;

/// 錯誤分類，對應 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidArguments,
    Fetch,
    Other,
}

impl ErrorCategory {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCategory::InvalidArguments => exit_codes::INVALID_ARGUMENTS,
            ErrorCategory::Fetch => exit_codes::FETCH_FAILURE,
            ErrorCategory::Other => exit_codes::OTHER_ERROR,
        }
    }
}

pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_ARGUMENTS: i32 = 1;
    pub const FETCH_FAILURE: i32 = 2;
    pub const NO_EVENTS_FOUND: i32 = 3;
    pub const OTHER_ERROR: i32 = 4;
}

impl TrackError {
    pub fn format(message: impl Into<String>) -> Self {
        TrackError::FormatError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackError::ArgumentError { .. }
            | TrackError::ConfigError { .. }
            | TrackError::InvalidConfigValueError { .. } => ErrorCategory::InvalidArguments,
            TrackError::TransportError(_)
            | TrackError::TimeoutError { .. }
            | TrackError::FormatError { .. }
            | TrackError::DateParseError { .. } => ErrorCategory::Fetch,
            TrackError::IoError(_)
            | TrackError::SerializationError(_)
            | TrackError::CsvError(_) => ErrorCategory::Other,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TrackError::ArgumentError { message } => message.clone(),
            TrackError::TransportError(e) if e.is_connect() => {
                "Could not connect to the tracking service".to_string()
            }
            TrackError::TransportError(e) if e.is_status() => match e.status() {
                Some(status) => format!("Tracking service answered with HTTP {}", status),
                None => "Tracking service answered with an error status".to_string(),
            },
            TrackError::TransportError(_) => "Request to the tracking service failed".to_string(),
            TrackError::TimeoutError { seconds } => {
                format!("Tracking service did not answer within {} seconds", seconds)
            }
            TrackError::FormatError { message } => {
                format!("Tracking service returned unexpected data: {}", message)
            }
            TrackError::DateParseError { value, .. } => {
                format!("Tracking service returned an unreadable date: '{}'", value)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TrackError::ArgumentError { .. } => "Pass the tracking number as the first argument",
            TrackError::InvalidConfigValueError { .. } | TrackError::ConfigError { .. } => {
                "Check the command line options and configuration file"
            }
            TrackError::TransportError(_) => "Check your network connection and the service URL",
            TrackError::TimeoutError { .. } => "Retry later or raise --timeout",
            TrackError::FormatError { .. } | TrackError::DateParseError { .. } => {
                "The service layout may have changed; try the other --source"
            }
            TrackError::IoError(_) | TrackError::SerializationError(_) | TrackError::CsvError(_) => {
                "Check that standard output is writable"
            }
        }
    }
}
