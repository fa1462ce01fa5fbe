use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendationError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid argument '{name}' = '{value}': {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Internal state error: {message}")]
    StateError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Catalog,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for the binaries; `Low` still counts as success.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Low => 0,      // 警告，但成功
            Self::Medium => 2,   // 可重試錯誤
            Self::High => 1,     // 處理錯誤
            Self::Critical => 3, // 系統錯誤
        }
    }
}

impl RecommendationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::InvalidArgument { .. } | Self::ValidationError { .. } => ErrorCategory::Input,
            Self::CatalogError { .. } | Self::SerializationError(_) => ErrorCategory::Catalog,
            Self::IoError(_) | Self::StateError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } => ErrorSeverity::Low,
            // 目錄檔可能正在被更新，重試通常可解決
            Self::CatalogError { .. } | Self::IoError(_) => ErrorSeverity::Medium,
            Self::StateError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not read a required file: {}", e),
            Self::SerializationError(e) => format!("The product catalog is not valid JSON: {}", e),
            Self::InvalidArgument { name, value, .. } => {
                format!("'{}' is not a valid value for {}", value, name)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            Self::InvalidConfigValueError { field, value, reason } => {
                format!("Configuration field '{}' has invalid value '{}' ({})", field, value, reason)
            }
            Self::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            Self::CatalogError { message } => format!("Product catalog unavailable: {}", message),
            Self::ValidationError { message } => format!("Invalid input: {}", message),
            Self::StateError { message } => format!("Internal error: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the configuration file or command line flags",
            ErrorCategory::Input => "Check the request arguments; max_responses must be zero or greater",
            ErrorCategory::Catalog => "Verify the catalog path and that products.json is well-formed",
            ErrorCategory::System => "Restart the service; if the problem persists, check file permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, RecommendationError>;
