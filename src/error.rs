use thiserror::Error;

/// Coarse failure category, for callers that map errors onto their own protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Network,
    ResponseFormat,
    Render,
}

/// Errors surfaced by the summarization and document pipeline
#[derive(Debug, Error)]
pub enum RecapError {
    /// Required configuration (the API credential) is missing
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure or non-2xx status from the completion endpoint
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered 2xx but the body did not have the expected shape
    #[error("Response format error: {0}")]
    ResponseFormat(String),

    /// No document backend could write the requested output
    #[error("Render error: {0}")]
    Render(String),
}

impl RecapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecapError::Config(_) => ErrorKind::Config,
            RecapError::Network(_) => ErrorKind::Network,
            RecapError::ResponseFormat(_) => ErrorKind::ResponseFormat,
            RecapError::Render(_) => ErrorKind::Render,
        }
    }
}
