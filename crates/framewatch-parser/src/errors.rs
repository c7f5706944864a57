use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("missing required column(s): {}", .columns.join(", "))]
    MissingColumns { columns: Vec<&'static str> },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("data row on line {line} has an unrecognized Datetime '{value}'")]
    InvalidTimestamp { line: u64, value: String },

    #[error("data row on line {line} invalid: {message}")]
    DataRow { line: u64, message: String },
}
