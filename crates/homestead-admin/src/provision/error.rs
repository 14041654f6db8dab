use homestead_core::{RequestId, Status};

/// Failure modes of the provisioning procedure.
///
/// Every variant is fatal to the run: the tool makes no attempt to
/// retry or to roll back partially created OS state.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// The record is past `Pending`; provisioning it again would
    /// attempt to create the account a second time. Checked before any
    /// OS interaction.
    #[error("request {id} is not pending (status: {status})")]
    NotPending { id: RequestId, status: Status },

    /// The external account-creation command exited with failure.
    #[error("{command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// The account did not resolve in the user database after creation.
    #[error("account '{username}' not found")]
    UnknownAccount { username: String },

    /// Loading or writing the request record failed.
    #[error(transparent)]
    Store(#[from] homestead_core::Error),

    /// An OS-level file, ownership, or process operation failed.
    #[error("os operation failed: {0}")]
    Io(#[from] std::io::Error),
}
