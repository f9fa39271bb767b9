use thiserror::Error;

/// Errors raised by the permission clients and their collaborators.
#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Identity error: {0}")]
    Identity(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Permission backend returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unexpected authorization response: {0}")]
    UnexpectedResponse(String),

    #[error("Permission backend returned no decision")]
    EmptyResponse,

    #[error("Config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for PermissionError {
    fn from(err: reqwest::Error) -> Self {
        PermissionError::Http(err.to_string())
    }
}
