#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Invalid record on line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    #[error("Dataset request failed [{status}]: {body}")]
    Http { status: u16, body: String },

    #[error("Record not found: {0}")]
    RecordNotFound(String),
}
