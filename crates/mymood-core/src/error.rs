//! Error types for MyMood

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using MyMood's Error
pub type Result<T> = std::result::Result<T, Error>;

/// MyMood error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Local file errors (E001-E099)
    #[error("Image file {} does not exist.", .0.display())]
    ImageNotFound(PathBuf),

    #[error("Failed to read image: {0}")]
    ImageReadError(String),

    // Remote errors (E100-E199)
    #[error("Network error: {0}. Check your internet connection.")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unauthorized (HTTP {status}): {body}. Check your API key.")]
    Unauthorized { status: u16, body: String },

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error (HTTP {status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::ImageNotFound(_) => "E001",
            Self::ImageReadError(_) => "E002",
            Self::NetworkError(_) => "E100",
            Self::Unauthorized { .. } => "E101",
            Self::ResourceNotFound(_) => "E102",
            Self::RateLimited(_) => "E103",
            Self::ApiError { .. } => "E104",
            Self::InvalidResponse(_) => "E105",
            Self::ConfigError(_) => "E600",
            Self::InvalidInput(_) => "E800",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ImageNotFound(path) => {
                Some(format!("Check that {} exists and is readable", path.display()))
            }
            Self::NetworkError(_) => Some("Check internet connection".to_string()),
            Self::Unauthorized { .. } => Some("Set MYMOOD_API_KEY or pass --api-key".to_string()),
            Self::RateLimited(_) => Some("Wait a moment before sending more requests".to_string()),
            Self::ConfigError(_) => Some("mymood config".to_string()),
            _ => None,
        }
    }

    /// HTTP status of the response that caused this error, if it came from the API
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } => Some(*status),
            Self::ResourceNotFound(_) => Some(404),
            Self::RateLimited(_) => Some(429),
            Self::ApiError { status, .. } => Some(*status),
            Self::NetworkError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the failure was raised locally, before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::ImageNotFound(_) | Self::ImageReadError(_) | Self::ConfigError(_) | Self::InvalidInput(_)
        )
    }
}
