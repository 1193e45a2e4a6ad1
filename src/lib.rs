//! Larder: schema-driven document-collection backend.
//!
//! Five inventory resources (pantry, products, shoppinglist, templates,
//! users) share one generic engine. Each resource contributes only data: a
//! field schema for filtering/sorting and an ordered validation-rule chain.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod query;
pub mod routes;
pub mod schema;
pub mod state;
pub mod store;
pub mod validate;

pub use catalog::model;
pub use engine::Engine;
pub use error::AppError;
pub use query::{build_filter, build_sort, FilterSpec, SortSpec};
pub use routes::{common_routes, resource_routes};
pub use schema::{Model, ResourceSchema};
pub use state::AppState;
pub use store::{memory::MemoryStore, postgres::PgStore, Document, DocumentStore};
