use crate::error::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, error, warn};

/// Logging and presentation helpers shared by every error enum.
pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    /// A message fit for end users, free of internal detail.
    fn user_friendly_message(&self) -> String;
    /// Stable, machine-readable code.
    fn error_code(&self) -> &'static str;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!(code = self.error_code(), "{}", self);
        match self {
            CoreError::Config(inner) => debug!("Config failure: {:?}", inner),
            CoreError::Query(inner) => debug!("Rejected query: {:?}", inner),
            CoreError::Export(inner) => debug!("Export failure: {:?}", inner),
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = self.error_code(), "{}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Config(inner) => inner.user_friendly_message(),
            CoreError::Query(inner) => inner.user_friendly_message(),
            CoreError::Export(inner) => inner.user_friendly_message(),
            CoreError::Serialization(_) => "The result could not be rendered as JSON.".to_string(),
            CoreError::Internal { .. } => "The dataset could not be prepared. Please retry.".to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CoreError::Config(_) => "CONFIG",
            CoreError::Query(_) => "QUERY",
            CoreError::Export(_) => "EXPORT",
            CoreError::Serialization(_) => "SERIALIZATION",
            CoreError::Internal { .. } => "INTERNAL",
        }
    }
}

impl ErrorExt for QueryError {
    fn log_error(&self) -> &Self {
        error!(code = self.error_code(), "{}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = self.error_code(), "{}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            QueryError::MissingParameter { name } => {
                format!("The '{}' parameter is required.", name)
            }
            QueryError::InvalidDate { value } => {
                format!("'{}' is not a valid date. Use the YYYY-MM-DD format.", value)
            }
            QueryError::InvalidSentiment { value } => format!(
                "'{}' is not a sentiment. Use positive, neutral or negative.",
                value
            ),
            QueryError::UnknownEntity { id } => {
                format!("Community '{}' is not tracked.", id)
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            QueryError::MissingParameter { .. } => "QUERY_MISSING_PARAMETER",
            QueryError::InvalidDate { .. } => "QUERY_INVALID_DATE",
            QueryError::InvalidSentiment { .. } => "QUERY_INVALID_SENTIMENT",
            QueryError::UnknownEntity { .. } => "QUERY_UNKNOWN_ENTITY",
        }
    }
}

impl ErrorExt for ExportError {
    fn log_error(&self) -> &Self {
        error!(code = self.error_code(), "{}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = self.error_code(), "{}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ExportError::EmptyWindow => "There is no data in the selected range to export.".to_string(),
            ExportError::Io(_) => "The CSV file could not be written to the output directory.".to_string(),
            ExportError::Csv(_) | ExportError::Encoding(_) => {
                "The CSV table could not be produced.".to_string()
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExportError::EmptyWindow => "EXPORT_EMPTY_WINDOW",
            ExportError::Csv(_) => "EXPORT_CSV",
            ExportError::Encoding(_) => "EXPORT_ENCODING",
            ExportError::Io(_) => "EXPORT_IO",
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!(code = self.error_code(), "{}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = self.error_code(), "{}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' was not found.", path)
            }
            ConfigError::InvalidValue { field, value } => {
                format!("'{}' is not allowed for '{}'.", value, field)
            }
            ConfigError::ValidationFailed { reason } => {
                format!("Configuration is not valid: {}", reason)
            }
            ConfigError::Parse(_) => "The configuration file is not valid TOML.".to_string(),
            ConfigError::Serialize(_) => "The configuration could not be rendered.".to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED",
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR",
            ConfigError::Serialize(_) => "CONFIG_SERIALIZE_ERROR",
        }
    }
}

/// Logs errors on behalf of a front end and renders the line shown to the
/// user. Keeps a tally of what it reported.
#[derive(Debug)]
pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
    errors_reported: AtomicUsize,
    warnings_reported: AtomicUsize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
            errors_reported: AtomicUsize::new(0),
            warnings_reported: AtomicUsize::new(0),
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn report_error(&self, error: &CoreError) {
        if self.report_errors {
            error.log_error();
            self.errors_reported.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn report_warning(&self, error: &CoreError) {
        if self.report_warnings {
            error.log_warn();
            self.warnings_reported.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// `"<user message> (<CODE>)"`
    pub fn render(&self, error: &CoreError) -> String {
        format!("{} ({})", error.user_friendly_message(), error.error_code())
    }

    pub fn errors_reported(&self) -> usize {
        self.errors_reported.load(Ordering::Relaxed)
    }

    pub fn warnings_reported(&self) -> usize {
        self.warnings_reported.load(Ordering::Relaxed)
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
