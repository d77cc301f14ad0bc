//! Failure taxonomy for calls against the Pokemon API

use reqwest::StatusCode;

/// Fallback text for a 409 whose body carries no message
pub const CONFLICT_FALLBACK: &str = "This Pokémon already exists";

/// Errors surfaced by [`crate::api::PokemonApi`]. The `Display` text is what
/// the UI shows next to the control that triggered the request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Pokémon not found")]
    NotFound,
    #[error("Invalid data provided")]
    InvalidInput,
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid response format from API")]
    MalformedResponse,
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// Generic non-success status: `Error 500`.
    pub fn status(status: StatusCode) -> Self {
        ApiError::Status {
            status: status.as_u16(),
            message: format!("Error {}", status.as_u16()),
        }
    }

    /// Status plus reason phrase: `Error 500: Internal Server Error`.
    pub fn status_with_reason(status: StatusCode) -> Self {
        ApiError::Status {
            status: status.as_u16(),
            message: format!(
                "Error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::InvalidInput => Some(400),
            ApiError::Conflict(_) => Some(409),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::MalformedResponse | ApiError::Transport(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::MalformedResponse
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}
