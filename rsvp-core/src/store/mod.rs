//! Storage adapters.
//!
//! Two interchangeable backends satisfy the same two-operation contract:
//! - `FileStore` keeps every RSVP in one pretty-printed JSON array.
//! - `FirestoreStore` writes one document per RSVP to a hosted collection.
//!
//! The service only sees `Arc<dyn RsvpStore>` and never knows which is active.

mod file;
mod firestore;

pub use file::FileStore;
pub use firestore::FirestoreStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Backend, StorageConfig};
use crate::error::RsvpResult;
use crate::rsvp::Rsvp;

#[async_trait]
pub trait RsvpStore: Send + Sync {
    /// Every stored RSVP, in no particular order.
    ///
    /// Returns an empty list when nothing has been stored yet.
    async fn list_all(&self) -> RsvpResult<Vec<Rsvp>>;

    /// Durably persist one RSVP without losing any stored before it.
    ///
    /// Returns the record as stored, including any store-assigned id.
    async fn append(&self, rsvp: Rsvp) -> RsvpResult<Rsvp>;

    /// Short name for logs and health output.
    fn backend_name(&self) -> &'static str;
}

/// Build the adapter selected by `config`.
pub async fn open(config: &StorageConfig) -> RsvpResult<Arc<dyn RsvpStore>> {
    let store: Arc<dyn RsvpStore> = match config.backend {
        Backend::File => Arc::new(FileStore::open(config.data_path()).await?),
        Backend::Firestore => Arc::new(FirestoreStore::new(config.firestore()?.clone())?),
    };

    tracing::info!(backend = store.backend_name(), "storage ready");
    Ok(store)
}
