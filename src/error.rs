use thiserror::Error;

#[derive(Error, Debug)]
pub enum BakeryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Line {line}: cannot parse {column} value {value:?} ({reason})")]
    Parse {
        line: u64,
        column: String,
        value: String,
        reason: String,
    },

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, BakeryError>;
