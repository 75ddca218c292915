/// Error types for the drought monitor core
use thiserror::Error;

/// Main error type for drought monitor operations
#[derive(Error, Debug)]
pub enum DmError {
    /// Region payload could not be decoded
    #[error("Failed to parse region data: {0}")]
    RegionParse(#[from] serde_json::Error),

    /// Region payload is missing the requested variable
    #[error("Variable not present in region data: {0}")]
    UnknownVariable(String),

    /// Region payload is structurally wrong
    #[error("Invalid region data: {0}")]
    InvalidRegion(String),

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),

    /// Bin count or domain cannot produce a histogram
    #[error("Invalid bin specification: {0}")]
    InvalidBins(String),

    /// Extent requested over an empty coordinate list
    #[error("Cannot compute extent of an empty region")]
    EmptyExtent,

    /// Configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Type alias for Results using DmError
pub type Result<T> = std::result::Result<T, DmError>;
