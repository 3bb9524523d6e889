use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Rejections raised by the request layer before the engine is invoked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("Invalid date: {value} (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("Invalid sentiment filter: {value}")]
    InvalidSentiment { value: String },

    #[error("Unknown entity: {id}")]
    UnknownEntity { id: String },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export for an empty window")]
    EmptyWindow,

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Exported table is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration rendering error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
