use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{Error, Request, RequestId, RequestStore, Result};

/// In-memory request store.
///
/// Test double for [`FsStore`](crate::FsStore) with the same
/// semantics: fresh id per save, `NotFound` for unknown ids. It also
/// counts save and load calls so tests can assert that rejected
/// submissions and malformed lookups never touch storage at all.
#[derive(Debug, Default)]
pub struct MemStore {
    records: Mutex<HashMap<RequestId, Request>>,
    saves: AtomicUsize,
    loads: AtomicUsize,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls served so far.
    pub fn save_calls(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }

    /// Number of `load` calls served so far.
    pub fn load_calls(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    fn records(&self) -> MutexGuard<'_, HashMap<RequestId, Request>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RequestStore for MemStore {
    fn save(&self, request: &Request) -> Result<RequestId> {
        self.saves.fetch_add(1, Ordering::Relaxed);
        let id = RequestId::generate();
        self.records().insert(id, request.clone());
        Ok(id)
    }

    fn load(&self, id: RequestId) -> Result<Request> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        self.records().get(&id).cloned().ok_or(Error::NotFound { id })
    }

    fn update(&self, id: RequestId, request: &Request) -> Result<()> {
        let mut records = self.records();
        if !records.contains_key(&id) {
            return Err(Error::NotFound { id });
        }
        records.insert(id, request.clone());
        Ok(())
    }

    fn ids(&self) -> Result<Vec<RequestId>> {
        Ok(self.records().keys().copied().collect())
    }
}
