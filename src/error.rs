//! Main Crate Error

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The job service could not be reached, answered with a non-success
    /// status, or sent a body that does not match the expected payload.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Invalid Base URI {0}")]
    InvalidBaseUri(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    ConfigDeserialization(#[from] toml::de::Error),
}

impl Error {
    /// HTTP status reported by the job service, if the failure carried one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Http(err) => err.status(),
            _ => None,
        }
    }
}
