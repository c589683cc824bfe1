use thiserror::Error;

pub type Result<T> = std::result::Result<T, AsRankError>;

#[derive(Debug, Error)]
pub enum AsRankError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("GraphQL error: {0}")]
    Graphql(String),

    #[error("ASN not found: {0}")]
    NotFound(String),

    #[error("Invalid ASN: {0:?}")]
    InvalidAsn(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for AsRankError {
    fn from(err: reqwest::Error) -> Self {
        AsRankError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AsRankError {
    fn from(err: serde_json::Error) -> Self {
        AsRankError::Parse(err.to_string())
    }
}
