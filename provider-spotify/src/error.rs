//! Error types for the Spotify provider

use thiserror::Error;

/// Spotify provider errors
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// API request returned a non-retryable error, or retries were exhausted
    #[error("Spotify API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse an API response
    #[error("Failed to parse Spotify response: {0}")]
    Parse(String),

    /// Transport-level failure
    #[error(transparent)]
    Http(#[from] bridge_http::HttpError),
}

/// Result type for Spotify operations
pub type Result<T> = std::result::Result<T, SpotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SpotifyError::Api {
            status: 404,
            message: "Playlist not found".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Spotify API error (status 404): Playlist not found"
        );
    }
}
