use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    /// The request never produced a usable response: connection failure,
    /// timeout, or a non-success HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote API answered with its own error envelope.
    #[error("api error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cancelled")]
    Cancelled,
}

impl FeedError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FeedError::Cancelled)
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Transport(err.to_string())
    }
}
