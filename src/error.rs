use thiserror::Error;

/// Failures raised by numeral conversion and arithmetic.
///
/// Validation of credentials never produces one of these; validators report
/// through their return values instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumeralError {
    /// Input or arithmetic result is not an integer in [1, 3999].
    #[error("Input must be a number between 1 and 3999 (got {0})")]
    Range(String),

    #[error("Invalid numeral symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("Cannot divide by zero")]
    DivisionByZero,

    #[error("Modernizer failed: {0}")]
    Modernizer(#[from] ModernizerError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModernizerError {
    #[error("Value {0} cannot be written as a standard numeral")]
    OutOfRange(u16),

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    BadResponse(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode store: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Failed to (de)serialize history: {0}")]
    Json(#[from] serde_json::Error),
}
