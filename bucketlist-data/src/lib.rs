//! Persistence and remote data access for the Bucket List places engine.
//!
//! Responsibilities:
//! - Keep the saved places durable in a single protected file ([`store`]).
//! - Query the remote geosearch service for nearby pages ([`nearby`]).
//! - Persist small user preferences such as the map style ([`preferences`]).
//!
//! Boundaries:
//! - Domain rules (identity, ordering, defaults) live in `bucketlist-core`.
//! - Failures are recovered locally but always reported to the caller.
//!
//! Invariants:
//! - The store file always holds the entire list; there is no append log.
//! - No global mutable state.

pub mod nearby;
pub mod preferences;
pub mod store;
