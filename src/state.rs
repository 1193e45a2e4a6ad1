//! Shared application state for all routes.

use std::sync::Arc;

use crate::schema::Model;
use crate::store::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub model: &'static Model,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, model: &'static Model) -> Self {
        AppState { store, model }
    }
}
