use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to read index file {path}: {reason}")]
    IndexReadError { path: String, reason: String },

    #[error("Failed to read record '{id}' from {path}: {reason}")]
    RecordReadError {
        id: String,
        path: String,
        reason: String,
    },

    #[error("Record '{id}' is missing required field '{field}'")]
    MissingFieldError { id: String, field: String },

    #[error("Cannot render a chart with no categories")]
    EmptyInputError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Rendering error: {message}")]
    RenderError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Render,
    Config,
    System,
}

/// How bad a failure is. Every severity aborts the run with a non-zero exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ChartError {
    pub fn render<E: std::fmt::Display>(err: E) -> Self {
        ChartError::RenderError {
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ChartError::IndexReadError { .. } | ChartError::RecordReadError { .. } => {
                ErrorCategory::Input
            }
            ChartError::MissingFieldError { .. } | ChartError::EmptyInputError => {
                ErrorCategory::Data
            }
            ChartError::RenderError { .. } => ErrorCategory::Render,
            ChartError::ConfigError { .. }
            | ChartError::ConfigValidationError { .. }
            | ChartError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            ChartError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Config => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data | ErrorCategory::Render => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ChartError::IndexReadError { path, .. } => format!(
                "Check that {} exists and contains a JSON array of objects with an \"id\" field",
                path
            ),
            ChartError::RecordReadError { path, .. } => format!(
                "Check that {} exists and contains a single movie object",
                path
            ),
            ChartError::MissingFieldError { id, field } => format!(
                "Add \"{}\" to the record for '{}' or remove it from the index",
                field, id
            ),
            ChartError::EmptyInputError => {
                "No movie has Metacritic reviews; check the records directory".to_string()
            }
            ChartError::RenderError { .. } => {
                "Try a smaller figure or pass --config with a font_path".to_string()
            }
            ChartError::ConfigError { .. }
            | ChartError::ConfigValidationError { .. }
            | ChartError::InvalidConfigValueError { .. } => {
                "Fix the chart settings file or drop --config to use the defaults".to_string()
            }
            ChartError::IoError(_) => {
                "Check file permissions and free disk space in the output directory".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ChartError::IndexReadError { path, .. } => {
                format!("Could not load the movie index at {}", path)
            }
            ChartError::RecordReadError { id, .. } => {
                format!("Could not load the record for movie '{}'", id)
            }
            ChartError::MissingFieldError { id, field } => {
                format!("Movie '{}' has no '{}' field", id, field)
            }
            ChartError::EmptyInputError => "There is nothing to chart".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = vec![
            ChartError::IndexReadError {
                path: "movies.json".to_string(),
                reason: "missing".to_string(),
            },
            ChartError::MissingFieldError {
                id: "tt01".to_string(),
                field: "original_language".to_string(),
            },
            ChartError::EmptyInputError,
            ChartError::ConfigError {
                message: "bad".to_string(),
            },
            ChartError::IoError(std::io::Error::other("disk")),
        ];

        for err in errors {
            assert_ne!(err.exit_code(), 0, "{} must not exit 0", err);
        }
    }

    #[test]
    fn test_missing_field_message_names_record_and_field() {
        let err = ChartError::MissingFieldError {
            id: "tt0111161".to_string(),
            field: "original_language".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("tt0111161"));
        assert!(message.contains("original_language"));
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
