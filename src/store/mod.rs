//! Document-store capability the engine depends on.
//!
//! The engine never sees a concrete driver: it needs exactly find, point
//! lookup, insert, and delete-by-id on named collections. Backends must make
//! single-document insert and delete atomic; no multi-document transactions
//! exist in this system.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::query::{FilterSpec, SortSpec};

/// A stored document: its declared fields, plus the identity injected under
/// [`ID_FIELD`] on every read.
pub type Document = serde_json::Map<String, Value>;

/// Field name the store injects on read. Never client-supplied.
pub const ID_FIELD: &str = "id";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("backend: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Filtered, ordered scan of one collection. Ties and unknown sort
    /// fields preserve insertion order.
    async fn find(
        &self,
        collection: &str,
        filter: &FilterSpec,
        sort: &SortSpec,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(&self, collection: &str, id: Uuid)
        -> Result<Option<Document>, StoreError>;

    /// Atomic insert assigning a fresh identity; returns it.
    async fn insert(&self, collection: &str, doc: Document) -> Result<Uuid, StoreError>;

    /// Atomic delete of at most one document; returns the deleted count.
    async fn delete_by_id(&self, collection: &str, id: Uuid) -> Result<u64, StoreError>;
}
