use thiserror::Error;

#[derive(Debug, Error)]
pub enum SendbotError {
    #[error("needed environment variables are not set: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("translator comment body unavailable: {0}")]
    Translators(String),

    #[error("tldr-bot responded with code {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("error sending data to tldr-bot: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SendbotError {
    /// True for failures of the outbound request itself, as opposed to bad input.
    pub fn is_delivery(&self) -> bool {
        matches!(
            self,
            SendbotError::UnexpectedStatus { .. } | SendbotError::Http(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SendbotError>;
