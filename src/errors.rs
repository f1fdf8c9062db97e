use thiserror::Error;

use crate::implementations::config::ConfigError;

/// Errors raised while producing an asset bundle for one prompt
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Rate limit exceeded. Please wait a moment before synthesizing new software.")]
    RateLimited,

    #[error(
        "The AI backend returned an empty response. This may be due to safety filters or token limits."
    )]
    EmptyResponse,

    #[error("The AI backend returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("The generated asset is incomplete. Retrying might improve the result.")]
    IncompleteAsset,

    #[error("The generated asset failed validation: {0}")]
    InvalidAsset(String),

    #[error("Generation service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Network error while contacting the generation service: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Coarse classification of a failed generation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RateLimited,
    EmptyResponse,
    MalformedResponse,
    IncompleteAsset,
    InvalidAsset,
    GenerationFailure,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::RateLimited => ErrorKind::RateLimited,
            GenerationError::EmptyResponse => ErrorKind::EmptyResponse,
            GenerationError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            GenerationError::IncompleteAsset => ErrorKind::IncompleteAsset,
            GenerationError::InvalidAsset(_) => ErrorKind::InvalidAsset,
            GenerationError::Service { .. }
            | GenerationError::Network(_)
            | GenerationError::Config(_) => ErrorKind::GenerationFailure,
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::MalformedResponse(err.to_string())
    }
}

/// Recoverable vs. non-recoverable errors
pub trait RecoverableError {
    fn is_recoverable(&self) -> bool;
    fn recovery_strategy(&self) -> Option<String>;
}

impl RecoverableError for GenerationError {
    // A failed attempt never poisons the session; the user can always resubmit.
    fn is_recoverable(&self) -> bool {
        true
    }

    fn recovery_strategy(&self) -> Option<String> {
        match self {
            GenerationError::RateLimited => {
                Some("Wait a moment, then submit the prompt again.".to_string())
            }
            GenerationError::Config(_) => {
                Some("Set API_KEY (or GEMINI_API_KEY) and submit again.".to_string())
            }
            GenerationError::IncompleteAsset
            | GenerationError::MalformedResponse(_)
            | GenerationError::InvalidAsset(_)
            | GenerationError::EmptyResponse => {
                Some("Submit the prompt again; the model output varies between runs.".to_string())
            }
            GenerationError::Service { .. } | GenerationError::Network(_) => None,
        }
    }
}
