use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("Non-finite value for {0}")]
    NonFinite(String),

    #[error("Sector P/E must be non-zero")]
    ZeroSectorPe,

    #[error("Price must be positive, got {0}")]
    NonPositivePrice(f64),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Parse(err.to_string())
    }
}
