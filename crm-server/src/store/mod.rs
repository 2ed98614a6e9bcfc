//! In-process entity store
//!
//! The store is the sole serialization point of the service: every mutation
//! happens inside a write lock on the owning collection, and the derivation
//! services only ever see immutable snapshots.

pub mod entity_store;
pub mod seed;

pub use entity_store::{EntityStore, InvoiceMutation, Snapshot};
