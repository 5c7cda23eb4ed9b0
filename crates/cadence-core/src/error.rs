use thiserror::Error;

#[derive(Debug, Error)]
pub enum CadenceError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A recurrence form or payload failed validation. `code` is the
    /// validator's stable error code.
    #[error("{message}")]
    Validation { code: &'static str, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CadenceError {
    /// Short error code string shown next to the message on the command line.
    pub fn code(&self) -> &'static str {
        match self {
            CadenceError::Config(_) => "CONFIG_ERROR",
            CadenceError::Validation { code, .. } => code,
            CadenceError::Serialization(_) => "SERIALIZATION_ERROR",
            CadenceError::Io(_) => "IO_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, CadenceError>;
