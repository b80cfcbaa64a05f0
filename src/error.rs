use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Config directory not found at {0}. Run 'calcreport init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse data file {path}: {source}")]
    DataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Calculation {0} not found")]
    CalculationNotFound(u32),

    #[error("Missing calculation identifier. Use --id <ID> with the '{0}' report.")]
    MissingCalculationId(String),

    #[error("Unknown locale '{0}'. Supported locales: en-US, en-GB, fr-CH, de-CH, fr-FR, de-DE")]
    UnknownLocale(String),

    #[error("Invalid table usage: {0}")]
    TableUsage(String),

    #[error("Invalid render state: cannot go from {from} to {to}")]
    InvalidState { from: String, to: String },

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("Failed to load image {path}: {reason}")]
    Image { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Shorthand for a table builder misuse.
    pub fn table(message: impl Into<String>) -> Self {
        ReportError::TableUsage(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
