//! Error types for print specification building.

use thiserror::Error;

/// Result type alias using PrintError.
pub type PrintResult<T> = Result<T, PrintError>;

/// Primary error type for print specification operations.
#[derive(Debug, Error)]
pub enum PrintError {
    // === View State Errors ===
    #[error("Incomplete view state: missing {}", .missing.join(", "))]
    IncompleteViewState { missing: Vec<&'static str> },

    #[error("Invalid unit kind: {0}")]
    InvalidUnitKind(String),

    #[error("Unsupported projection: {0}")]
    UnsupportedProjection(String),

    // === Translation Errors ===
    #[error("Style translation failed: {0}")]
    StyleTranslation(String),

    #[error("Failed to build print specification: {0}")]
    SpecBuildFailed(#[source] Box<PrintError>),

    // === Outbound Errors ===
    #[error("Print service error: {0}")]
    PrintService(String),

    // === Input Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PrintError {
    /// Wrap an error raised while assembling a spec.
    ///
    /// Already-wrapped errors are returned untouched so the cause chain stays
    /// one level deep.
    pub fn spec_build_failed(err: PrintError) -> Self {
        match err {
            PrintError::SpecBuildFailed(_) => err,
            other => PrintError::SpecBuildFailed(Box::new(other)),
        }
    }
}

impl From<std::io::Error> for PrintError {
    fn from(err: std::io::Error) -> Self {
        PrintError::InvalidInput(err.to_string())
    }
}

impl From<serde_json::Error> for PrintError {
    fn from(err: serde_json::Error) -> Self {
        PrintError::InvalidInput(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for PrintError {
    fn from(err: serde_yaml::Error) -> Self {
        PrintError::InvalidInput(format!("YAML error: {}", err))
    }
}
