use thiserror::Error;

/// Failure taxonomy for catalog calls. The display strings are the exact
/// user-facing messages. Cancellation is deliberately absent: a superseded
/// request is discarded silently and is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Transport-level failure: the request could not be sent, the response
    /// had a non-success status, or the body could not be decoded.
    #[error("Failed to Fetch")]
    FetchFailed,

    /// The catalog answered but reported no match.
    #[error("Movie not found")]
    NotFound,
}
