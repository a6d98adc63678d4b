use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoxmatchError {
    #[error("Catalog download failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Catalog source returned status {status} for {source_id}")]
    SourceStatusError { source_id: String, status: u16 },

    #[error("Could not read catalog file {path}: {cause}")]
    SourceReadError {
        path: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("Catalog line {line} has {found} fields, header has {expected}")]
    RaggedRowError {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Catalog is missing required column '{column}'")]
    MissingColumnError { column: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Package name cannot be empty")]
    EmptyPackageName,

    #[error("Package {dimension} must be greater than 0 (got {value})")]
    NonPositiveDimension { dimension: &'static str, value: f64 },

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Product code {code} not found")]
    ProductNotFound { code: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Configuration,
    Validation,
    NotFound,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BoxmatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_)
            | Self::SourceStatusError { .. }
            | Self::SourceReadError { .. }
            | Self::CsvError(_)
            | Self::RaggedRowError { .. }
            | Self::MissingColumnError { .. } => ErrorCategory::Source,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::EmptyPackageName
            | Self::NonPositiveDimension { .. }
            | Self::InvalidInput { .. } => ErrorCategory::Validation,
            Self::ProductNotFound { .. } => ErrorCategory::NotFound,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Source => match self {
                Self::HttpError(_)
                | Self::SourceStatusError { .. }
                | Self::SourceReadError { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// Errors the interactive shell reports inline before reading the next command.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::NotFound
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::HttpError(_) | Self::SourceStatusError { .. } => {
                "Check the network connection and that the catalog URL is reachable".to_string()
            }
            Self::SourceReadError { path, .. } => {
                format!("Check that '{}' exists and is readable", path)
            }
            Self::CsvError(_) | Self::RaggedRowError { .. } => {
                "Check that the catalog uses the configured delimiter and that no row has extra fields"
                    .to_string()
            }
            Self::MissingColumnError { column } => format!(
                "Add a '{}' column to the catalog or map it under [catalog.columns]",
                column
            ),
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. } => {
                format!("Fix '{}' in the configuration file or CLI flags", field)
            }
            Self::EmptyPackageName => "Give the package a name".to_string(),
            Self::NonPositiveDimension { .. } => {
                "Use dimensions greater than 0 for height, width and depth".to_string()
            }
            Self::InvalidInput { field, .. } => match *field {
                "code" => "Enter the numeric product code".to_string(),
                "quantity" => "Enter a whole quantity of at least 1".to_string(),
                _ => format!("Enter a valid {}", field),
            },
            Self::ProductNotFound { .. } => {
                "Run 'catalog' to list the available product codes".to_string()
            }
            Self::IoError(_) | Self::SerializationError(_) => {
                "Check file permissions and available disk space".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(_) | Self::SourceStatusError { .. } => {
                format!("Could not download the product catalog: {}", self)
            }
            Self::SourceReadError { .. }
            | Self::CsvError(_)
            | Self::RaggedRowError { .. }
            | Self::MissingColumnError { .. } => {
                format!("Could not read the product catalog: {}", self)
            }
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BoxmatchError>;
