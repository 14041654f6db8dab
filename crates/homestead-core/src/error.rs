use crate::RequestId;

pub type Result<T> = core::result::Result<T, Error>;

/// All failure modes of the request model and its stores.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The supplied identifier string is not a full canonical request
    /// id. Rejected before any store access.
    #[error("malformed request id: {input:?}")]
    MalformedId { input: String },

    /// No usable record exists for the id: either nothing is stored
    /// under it, or the stored bytes no longer deserialize.
    #[error("no request found for id {id}")]
    NotFound { id: RequestId },

    /// Reading or writing the backing storage failed.
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized into the on-disk format.
    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
