use std::io;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Cannot use ':' as the field delimiter; it separates attribute keys from values")]
    ReservedDelimiter,

    #[error("Field delimiter must be a single ASCII character other than a line break (got byte {0:#04x})")]
    InvalidDelimiter(u8),

    #[error("Failed parsing file '{file}' on line {line}: {kind}")]
    Line {
        file: String,
        line: usize,
        kind: ParseErrorKind,
    },
}

impl ParseError {
    /// The 1-based line the error refers to, if it refers to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::ReservedDelimiter | ParseError::InvalidDelimiter(_) => None,
            ParseError::Line { line, .. } => Some(*line),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("Required field '{field}' is missing")]
    MissingField { field: &'static str },
    #[error("Required field '{field}' is empty")]
    EmptyField { field: &'static str },
    #[error("Invalid integer for '{field}' (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float for '{field}' (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Attribute '{token}' must contain exactly one ':' between key and value")]
    MalformedAttribute { token: String },
    #[error("Attribute '{token}' has an empty key")]
    EmptyAttributeKey { token: String },
}

/// Errors raised while reading or writing an annotation interchange file.
#[derive(Debug, Error)]
pub enum InterchangeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("File I/O error for '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Delimited record error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot write {field} '{value}' of protein '{unique_id}': {reason}")]
    Unwritable {
        unique_id: String,
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}
