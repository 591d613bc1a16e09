use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Dataset for {city} not found at {path}")]
    DatasetNotFound { city: String, path: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed record at row {row}: {message}")]
    MalformedRecord { row: usize, message: String },

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Dataset,
    Io,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ExplorerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DatasetNotFound { .. } | Self::CsvError(_) | Self::MalformedRecord { .. } => {
                ErrorCategory::Dataset
            }
            Self::IoError(_) => ErrorCategory::Io,
            Self::SerializationError(_) => ErrorCategory::Output,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 報告寫入失敗不影響已顯示的統計結果
            Self::SerializationError(_) => ErrorSeverity::Low,
            Self::MalformedRecord { .. } | Self::CsvError(_) => ErrorSeverity::Medium,
            Self::DatasetNotFound { .. }
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::DatasetNotFound { path, .. } => format!(
                "Place the city CSV at {} or point --data-dir at the folder holding it",
                path
            ),
            Self::CsvError(_) | Self::MalformedRecord { .. } => {
                "Check that the dataset is an unmodified bikeshare CSV export".to_string()
            }
            Self::IoError(_) => "Check file permissions and available disk space".to_string(),
            Self::SerializationError(_) => "Check the --report-path destination".to_string(),
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Review the TOML configuration file".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            Self::MissingConfigError { field } => format!("Provide a value for '{}'", field),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DatasetNotFound { city, .. } => {
                format!("No trip data is available for {}.", city)
            }
            Self::CsvError(_) | Self::MalformedRecord { .. } => {
                format!("The trip data could not be read: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dataset_is_high_severity() {
        let err = ExplorerError::DatasetNotFound {
            city: "Chicago".to_string(),
            path: "./chicago.csv".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Dataset);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("./chicago.csv"));
        assert_eq!(
            err.user_friendly_message(),
            "No trip data is available for Chicago."
        );
    }

    #[test]
    fn test_config_errors_share_category() {
        let err = ExplorerError::MissingConfigError {
            field: "datasets.dir".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains("datasets.dir"));
    }
}
