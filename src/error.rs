//! Error taxonomy for catalog access and recommendation runs.
//!
//! There is no local recovery: the first gateway failure anywhere in a run
//! aborts the whole run. Retry/backoff would belong at the gateway
//! boundary and is deliberately not implemented.

use crate::access::Access;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Non-success status, malformed payload, or transport failure from
    /// the catalog. Never retried.
    #[error("catalog request failed: {0}")]
    Upstream(String),

    /// The requested id does not exist upstream.
    #[error("{kind} {id} not found in the catalog")]
    ResourceNotFound { kind: &'static str, id: u64 },

    /// The interleaver ran out of candidate tracks before reaching the
    /// requested length.
    #[error("only {available} tracks available, {requested} requested")]
    InsufficientCatalog { available: usize, requested: usize },

    /// The gateway's access level does not permit the operation.
    #[error("with {access} permission you cannot {operation}")]
    PermissionDenied {
        access: Access,
        operation: &'static str,
    },

    /// Access levels above basic need a token at construction time.
    #[error("{0} access requires an access token; run `encore auth <token>` first")]
    TokenRequired(Access),

    /// Token persistence failed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Upstream(format!("malformed payload: {err}"))
    }
}
