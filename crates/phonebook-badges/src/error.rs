use thiserror::Error;

/// Badge pipeline error types.
///
/// [`Transport`] covers network-level failures (timeouts, refused
/// connections); [`Service`] covers failures the Displayer API itself
/// reports (non-2xx status, non-okay status marker). Callers can match on
/// the variant to tell the two apart.
///
/// [`Transport`]: BadgesError::Transport
/// [`Service`]: BadgesError::Service
#[derive(Error, Debug)]
pub enum BadgesError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Displayer API error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// A badge field absent from the raw payload was requested.
    #[error("Unknown badge field: {0}")]
    MissingField(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BadgesError {
    // --- Constructors ---

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error originated below the HTTP layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for BadgesError {
    fn from(err: reqwest::Error) -> Self {
        BadgesError::Transport(err.to_string())
    }
}

pub type BadgesResult<T> = Result<T, BadgesError>;
