//! Persistence for account requests.
//!
//! Two backends implement [`RequestStore`]: [`FsStore`] keeps one JSON
//! file per request in a spool directory (the production layout shared
//! by the web front end and the admin tool), and [`MemStore`] is an
//! in-memory double for tests. Which one a component talks to is fixed
//! at construction; nothing caches records across calls - the store is
//! the single source of truth for a request's status.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemStore;

use crate::{Request, RequestId, Result};

/// Save/load access to persisted requests, keyed by [`RequestId`].
pub trait RequestStore: Send + Sync {
    /// Persists a new record under a freshly minted id and returns the
    /// id. Existing records are never overwritten: every save generates
    /// a new identifier, so concurrent submissions cannot collide.
    fn save(&self, request: &Request) -> Result<RequestId>;

    /// Reads the record for `id`.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) when no
    /// record exists for the id or when the stored bytes no longer
    /// deserialize; either way the store is left untouched.
    fn load(&self, id: RequestId) -> Result<Request>;

    /// Overwrites the record for an existing `id` in place. This is the
    /// status write-back path used by provisioning.
    fn update(&self, id: RequestId, request: &Request) -> Result<()>;

    /// Enumerates the ids of every stored record, in no particular
    /// order. Entries whose names do not parse as ids are skipped.
    fn ids(&self) -> Result<Vec<RequestId>>;
}
