//! The generic resource engine: the four operations every variant shares,
//! parameterized by schema and store. Each operation makes exactly one store
//! call, so there is no partial failure to unwind.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;
use crate::query::{build_filter, build_sort};
use crate::schema::{FieldKind, ResourceSchema};
use crate::store::{Document, DocumentStore};
use crate::validate::run_chain;

pub struct Engine;

impl Engine {
    /// Filtered, sorted list. No filter parameters means the whole
    /// collection; that is not an error.
    pub async fn list(
        store: &dyn DocumentStore,
        schema: &ResourceSchema,
        params: &HashMap<String, String>,
    ) -> Result<Vec<Document>, AppError> {
        let filter = build_filter(schema, params)?;
        let sort = build_sort(schema, params);
        Ok(store.find(schema.collection, &filter, &sort).await?)
    }

    /// Point lookup. A malformed id is a caller error, distinct from a
    /// well-formed id that matches nothing.
    pub async fn get(
        store: &dyn DocumentStore,
        schema: &ResourceSchema,
        id_str: &str,
    ) -> Result<Document, AppError> {
        let id = Uuid::parse_str(id_str)
            .map_err(|_| AppError::MalformedId(schema.path_segment.to_string()))?;
        store
            .find_by_id(schema.collection, id)
            .await?
            .ok_or_else(|| AppError::NotFound(schema.path_segment.to_string()))
    }

    /// Validated insert. The candidate is normalized to exactly the declared
    /// field set before the rule chain runs; on any rule failure nothing is
    /// persisted. Returns the store-assigned identity.
    pub async fn create(
        store: &dyn DocumentStore,
        schema: &ResourceSchema,
        body: Value,
    ) -> Result<Uuid, AppError> {
        let Value::Object(map) = body else {
            return Err(AppError::ValidationFailed(
                "body must be a JSON object".to_string(),
            ));
        };
        let candidate = normalize(schema, &map);
        run_chain(&schema.rules, &candidate)?;
        Ok(store.insert(schema.collection, candidate).await?)
    }

    /// Delete at most one document. A malformed id collapses into the same
    /// not-found outcome as a well-formed-but-absent one; get keeps the two
    /// apart, delete deliberately does not.
    pub async fn delete(
        store: &dyn DocumentStore,
        schema: &ResourceSchema,
        id_str: &str,
    ) -> Result<(), AppError> {
        let not_found = || {
            AppError::NotFound(format!(
                "was unable to delete id {id_str}; perhaps illegal id or an id for an item not in the system"
            ))
        };
        let id = Uuid::parse_str(id_str).map_err(|_| not_found())?;
        let deleted = store.delete_by_id(schema.collection, id).await?;
        if deleted == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}

/// Shape the candidate to the declared field set: keep declared fields from
/// the body, fill missing integers with 0 and missing strings with null,
/// drop everything else (including any client-supplied id).
fn normalize(schema: &ResourceSchema, body: &Document) -> Document {
    let mut doc = Document::new();
    for field in &schema.fields {
        let value = match body.get(field.name) {
            Some(v) => v.clone(),
            None => match field.kind {
                FieldKind::Int => Value::from(0),
                FieldKind::Str => Value::Null,
            },
        };
        doc.insert(field.name.to_string(), value);
    }
    doc
}
