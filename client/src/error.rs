//! Failure taxonomy for calls against the game authority.

use thiserror::Error;

/// Everything that can go wrong between sending a request and decoding its response.
///
/// The game client never hands these to its callers. Each operation converts
/// them into a user-facing string on the store, so the variants only need to
/// carry enough to make that string useful and to single out `NotFound`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed (connection refused, reset, etc.).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The authority answered with a non-success status.
    #[error("authority rejected request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// The authority has nothing at that path, e.g. no active game.
    #[error("not found: {detail}")]
    NotFound { detail: String },

    /// A success response whose body does not match the contract.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}
