use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    EmptyResponse(String),

    #[error("{0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// HTTP status this error should be reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Upstream { status, .. } => *status,
            _ => 500,
        }
    }

    /// Whether the message is safe to hand back to a caller as-is.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Configuration(_)
                | Self::Upstream { .. }
                | Self::EmptyResponse(_)
        )
    }
}
