use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing user identifier, record id or route, detected before any request.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Gateway responded with {status}")]
    Gateway {
        status: u16,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode gateway response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Text shown to the user for this error.
    ///
    /// Backend messages are surfaced verbatim, local precondition and
    /// validation messages as-is, everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Precondition(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Gateway {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}
