use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Parse error at line {line}: {reason}: {content:?}")]
    ParseError {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
