use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Profile file '{path}' is unreadable: {reason}")]
    ProfileFormatError { path: String, reason: String },

    #[error("Completion service returned {status}: {message}")]
    ApiStatusError { status: u16, message: String },

    #[error("Model refused the request: {0}")]
    RefusalError(String),

    #[error("Completion service returned no content")]
    EmptyCompletionError,

    #[error("Model output does not match the doctor schema: {reason}")]
    SchemaViolationError { reason: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    ExternalService,
    ModelOutput,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MatchError::MissingConfigError { .. }
            | MatchError::InvalidConfigValueError { .. }
            | MatchError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            MatchError::ProfileFormatError { .. } | MatchError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            MatchError::ApiError(_) | MatchError::ApiStatusError { .. } => {
                ErrorCategory::ExternalService
            }
            MatchError::RefusalError(_)
            | MatchError::EmptyCompletionError
            | MatchError::SchemaViolationError { .. } => ErrorCategory::ModelOutput,
            MatchError::IoError(_) | MatchError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::ExternalService | ErrorCategory::ModelOutput => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MatchError::MissingConfigError { field } => {
                format!("Set {} in the environment or in the .env file", field)
            }
            MatchError::InvalidConfigValueError { field, .. }
            | MatchError::ConfigValidationError { field, .. } => {
                format!("Check the '{}' setting in the TOML config or CLI flags", field)
            }
            MatchError::ProfileFormatError { path, .. } => {
                format!("Make sure '{}' holds valid JSON (the profile store needs an array)", path)
            }
            MatchError::IoError(_) => "Check that the file exists and is readable".to_string(),
            MatchError::ApiError(_) => {
                "Check network connectivity and the configured api_base".to_string()
            }
            MatchError::ApiStatusError { status, .. } => match status {
                401 | 403 => "Check that OPENAI_API_KEY is valid".to_string(),
                404 => "Check the model name and api_base".to_string(),
                429 => "The service is rate limiting requests; try again later".to_string(),
                _ => "Try again later or inspect the service status".to_string(),
            },
            MatchError::RefusalError(_) => "Rephrase the medical request".to_string(),
            MatchError::EmptyCompletionError | MatchError::SchemaViolationError { .. } => {
                "Try again, or switch response_format to json_schema".to_string()
            }
            MatchError::SerializationError(_) => "The data could not be (de)serialized".to_string(),
            MatchError::ValidationError { .. } => "Fix the input and run again".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::ExternalService => format!("Could not reach the matching service: {}", self),
            ErrorCategory::ModelOutput => format!("Unusable answer from the model: {}", self),
            ErrorCategory::System => format!("Unexpected failure: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
