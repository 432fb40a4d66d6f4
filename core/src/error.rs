use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Dataset must be a JSON array of customer records")]
    NotAnArray,

    #[error("Record {index} is not a JSON object")]
    RecordNotObject { index: usize },

    #[error("Record {index}: '{field}' must be an array")]
    FieldNotArray { index: usize, field: &'static str },

    #[error("Record {index}: '{field}' must be an object")]
    FieldNotObject { index: usize, field: &'static str },

    #[error("Invalid policy: {reason}")]
    InvalidPolicy { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ValidateResult<T> = Result<T, ValidateError>;
