//! Core model for homestead, the self-service account request system
//! for a shared multi-user host.
//!
//! A request is submitted through the web front end, persisted as an
//! individually addressable JSON record, and later provisioned by an
//! operator running the admin tool. This crate owns the pieces both
//! binaries share:
//!
//! - [`Request`] and [`Status`] - the persisted record and its
//!   two-state lifecycle (`Pending` -> `AccountCreated`)
//! - [`RequestId`] - the random 128-bit key assigned exactly once, at
//!   save time
//! - [`RequestStore`] - the storage abstraction, with a filesystem
//!   backend ([`FsStore`]) and an in-memory test double ([`MemStore`])
//! - [`status_for`] - strict identifier parsing in front of status
//!   queries, so malformed ids never reach storage

mod error;
mod id;
mod lookup;
mod request;
mod store;

pub use error::{Error, Result};
pub use id::RequestId;
pub use lookup::status_for;
pub use request::{Request, Status};
pub use store::{FsStore, MemStore, RequestStore};
