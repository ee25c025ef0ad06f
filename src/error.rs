use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ValidationError: {0}")]
    Validation(#[from] ValidationError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Authentication required")]
    AuthRequired { message: String, hint: String },
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Operation cancelled")]
    Cancelled,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {message}")]
    Network { endpoint: String, message: String },
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {detail}")]
    Status {
        status: u16,
        endpoint: String,
        detail: String,
    },
    #[error("Authentication failed: {detail}")]
    Unauthorized {
        status: u16,
        endpoint: String,
        detail: String,
    },
    #[error("Failed to parse response: {message}")]
    Decode { endpoint: String, message: String },
}

/// Local, pre-submission failures. These never reach the network.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Required fields missing: {}", fields.join(", "))]
    RequiredFields { fields: Vec<String> },
    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },
    #[error("{message}")]
    BusinessRule { message: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String, hint: String },
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    Keyring(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },
    #[error("Configuration save failed")]
    ConfigSaveFailed,
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } | ApiError::Network { .. } => ErrorSeverity::Medium,
                ApiError::Status { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Api(ApiError::Status { detail, .. })
            | AppError::Api(ApiError::Unauthorized { detail, .. }) => detail.clone(),
            AppError::Validation(err) => format!("{}", err),
            AppError::Cli(CliError::AuthRequired { message, .. }) => message.clone(),
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(ApiError::Unauthorized { .. })
            | AppError::Cli(CliError::AuthRequired { .. }) => {
                Some("'loja-cli auth login' to authenticate and try again".to_string())
            }
            AppError::Api(ApiError::Timeout { .. }) | AppError::Api(ApiError::Network { .. }) => {
                Some("Check your internet connection and the configured API URL".to_string())
            }
            AppError::Config(ConfigError::FileNotFound { hint, .. }) => Some(hint.clone()),
            _ => None,
        }
    }
}
