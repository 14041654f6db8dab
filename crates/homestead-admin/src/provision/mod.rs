//! The provisioning procedure: turning a pending signup request into a
//! real OS account with the submitter's SSH key installed.
//!
//! Two modes exist. Enumeration ([`pending`]) builds the operator's
//! read-only worklist. Single-request provisioning ([`run`]) loads one
//! record, requires it to be `Pending`, and - unless the run is a dry
//! run, which is the default - creates the account, installs the
//! normalized key, hands ownership of the key to the new account, and
//! writes `AccountCreated` back to the store.
//!
//! The procedure is one-shot and fail-fast: any OS-level failure aborts
//! immediately with no rollback or retry, leaving the operator to
//! reconcile partial state by hand. Nothing locks the record between
//! the `Pending` check and the write-back, so two concurrent runs
//! against the same id could both pass the precondition; the tool is
//! meant to be run by a single operator, one request at a time.

mod error;
mod ops;

#[cfg(test)]
mod tests;

pub use error::ProvisionError;
pub use ops::{AccountOps, HostOps, Owner};

use std::path::PathBuf;

use homestead_core::{Request, RequestId, RequestStore, Status};

/// Result of a provisioning run.
#[derive(Debug)]
pub enum Outcome {
    /// Dry run: the record was loaded and checked, nothing was touched.
    DryRun(Request),
    /// The account exists, the key is installed, and the stored record
    /// now reads `AccountCreated`.
    Provisioned {
        request: Request,
        credential_path: PathBuf,
    },
}

/// Collects `(username, id)` for every record whose status is
/// `Pending`.
///
/// Read-only. Records that fail to load are logged and skipped, so one
/// corrupt file cannot hide the rest of the worklist.
pub fn pending(store: &dyn RequestStore) -> homestead_core::Result<Vec<(String, RequestId)>> {
    let mut worklist = Vec::new();
    for id in store.ids()? {
        let request = match store.load(id) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(%id, %err, "skipping unreadable request");
                continue;
            }
        };
        if request.status.is_pending() {
            worklist.push((request.username, id));
        }
    }
    Ok(worklist)
}

/// Runs the one-shot provisioning procedure for a single request.
///
/// In order: load the record (any failure is fatal), require `Pending`
/// - the only guard against provisioning a request twice - then, when
/// `execute` is set, create the account, write the normalized key to
/// the account's `authorized_keys`, resolve the account's uid/gid and
/// chown the credential to it, and finally persist the transition to
/// `AccountCreated` under the same id.
pub fn run(
    store: &dyn RequestStore,
    ops: &dyn AccountOps,
    id: RequestId,
    execute: bool,
) -> Result<Outcome, ProvisionError> {
    let mut request = store.load(id)?;

    if !request.status.is_pending() {
        return Err(ProvisionError::NotPending {
            id,
            status: request.status,
        });
    }

    if !execute {
        return Ok(Outcome::DryRun(request));
    }

    ops.create_account(&request.username)?;

    let credential_path = ops.credential_path(&request.username);
    let key = normalize_key(&request.ssh_public_key);
    ops.install_credential(&credential_path, key.as_bytes())?;

    let owner = ops.resolve_owner(&request.username)?;
    ops.chown(&credential_path, owner)?;
    if let Some(ssh_dir) = credential_path.parent() {
        ops.chown(ssh_dir, owner)?;
    }

    request.status = Status::AccountCreated;
    store.update(id, &request)?;
    tracing::info!(%id, username = %request.username, "request provisioned");

    Ok(Outcome::Provisioned {
        request,
        credential_path,
    })
}

/// Strips every CR and LF byte from submitted key material.
///
/// Keys pasted from other platforms often arrive with embedded line
/// endings, which would corrupt the single-line `authorized_keys`
/// format. All other bytes are preserved exactly.
fn normalize_key(key: &str) -> String {
    key.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}
