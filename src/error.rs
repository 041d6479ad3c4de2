use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("FetchError: {0}")]
    Fetch(#[from] FetchError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("DisplayError: {0}")]
    Display(#[from] DisplayError),
    #[error("TableError: {0}")]
    Table(#[from] TableError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Input error: {0}")]
    Input(String),
}

/// The single failure kind of the remote data source.
///
/// Every variant means "this page could not be fetched"; callers in the
/// core treat them alike and only the CLI looks at the details.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Connection failed: {message}")]
    Connection { endpoint: String, message: String },
    #[error("Malformed response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },
}

impl FetchError {
    pub fn endpoint(&self) -> &str {
        match self {
            FetchError::Timeout { endpoint, .. }
            | FetchError::Http { endpoint, .. }
            | FetchError::Connection { endpoint, .. }
            | FetchError::InvalidResponse { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed: {message}")]
    ConfigSaveFailed { message: String },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Terminal output error: {0}")]
    TerminalOutput(String),
    #[error("Pagination error: {0}")]
    Pagination(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown configuration key '{key}'")]
    UnknownKey { key: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Table controller has stopped")]
    ControllerStopped,
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
            AppError::Fetch(fetch_error) => match fetch_error {
                FetchError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                FetchError::Connection { .. } => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::Medium,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Display(_) => ErrorSeverity::Low,
            AppError::Table(_) => ErrorSeverity::Critical,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Fetch(FetchError::Timeout { .. } | FetchError::Connection { .. }) => {
                Some("Check your internet connection or the configured base_url".to_string())
            }
            AppError::Fetch(FetchError::InvalidResponse { .. }) => Some(
                "The server answered with an unexpected body; is base_url an artworks API?"
                    .to_string(),
            ),
            AppError::Config(ConfigError::UnknownKey { .. }) => Some(
                "Valid keys are: base_url, timeout_seconds, use_colors".to_string(),
            ),
            AppError::Storage(StorageError::ConfigParseError { .. }) => {
                Some("Fix or remove the config file, or pass --config-dir".to_string())
            }
            _ => None,
        }
    }
}
