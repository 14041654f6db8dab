use crate::{RequestId, RequestStore, Result, Status};

/// Resolves an externally supplied identifier string to the current
/// status of its request.
///
/// The raw string must be a full canonical id: malformed input
/// (including an id with trailing characters, or an empty string) is
/// rejected before the store is consulted, so mangled query URLs cost
/// no I/O. A well-formed but unknown id surfaces the store's
/// `NotFound`.
pub fn status_for(store: &dyn RequestStore, raw: &str) -> Result<Status> {
    let id: RequestId = raw.parse()?;
    Ok(store.load(id)?.status)
}
