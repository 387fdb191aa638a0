use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanupError {
    /// The recovery snapshot could not be confirmed within the polling
    /// budget. Pipeline-fatal: no removal call was issued.
    #[error(
        "Archive playlist verification failed: expected {expected} tracks, last saw {observed}. \
         Cleanup aborted before removals."
    )]
    Verification { expected: usize, observed: u64 },

    /// A remote operation failed outside the per-scope mutation phase
    #[error(transparent)]
    Spotify(#[from] provider_spotify::SpotifyError),
}

pub type Result<T> = std::result::Result<T, CleanupError>;
