//! Builders turning raw request query parameters into structured filter and
//! sort descriptions, driven by the resource schema. Backends interpret the
//! specs; nothing here touches the store.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::AppError;
use crate::schema::{FieldKind, FilterKind, ResourceSchema};

/// One field predicate. Clauses combine conjunctively; there is no OR or
/// negation.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Case-insensitive containment of the literal value. Backends must
    /// escape it so pattern metacharacters match literally.
    Contains(String),
    /// Typed equality (string or integer, per the field's declared kind).
    Eq(Value),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
    pub clauses: Vec<(String, Predicate)>,
}

impl FilterSpec {
    /// An empty spec matches every document; that is the "list all" case.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

/// Build the conjunctive filter for a list request. Parameters that don't
/// name a declared filterable field are ignored; a non-numeric value for a
/// declared integer field is a caller error.
pub fn build_filter(
    schema: &ResourceSchema,
    params: &HashMap<String, String>,
) -> Result<FilterSpec, AppError> {
    let mut spec = FilterSpec::default();
    for field in &schema.fields {
        let Some(filter) = field.filter else { continue };
        let Some(raw) = params.get(field.name) else { continue };
        let predicate = match (filter, field.kind) {
            (FilterKind::Substring, _) => Predicate::Contains(raw.clone()),
            (FilterKind::Exact, FieldKind::Str) => Predicate::Eq(Value::String(raw.clone())),
            (FilterKind::Exact, FieldKind::Int) => {
                let n: i64 = raw
                    .parse()
                    .map_err(|_| AppError::MalformedParameter(field.name.to_string()))?;
                Predicate::Eq(Value::Number(n.into()))
            }
        };
        spec.clauses.push((field.name.to_string(), predicate));
    }
    Ok(spec)
}

/// Read `sortby` (default: the schema's canonical name field) and
/// `sortorder`. Only the literal `desc` sorts descending; any other value is
/// ascending, with no error. `sortby` is not checked against the schema: an
/// unknown field compares all-equal in the store and leaves insertion order.
pub fn build_sort(schema: &ResourceSchema, params: &HashMap<String, String>) -> SortSpec {
    let field = params
        .get("sortby")
        .cloned()
        .unwrap_or_else(|| schema.default_sort_field.to_string());
    let order = match params.get("sortorder").map(String::as_str) {
        Some("desc") => SortOrder::Desc,
        _ => SortOrder::Asc,
    };
    SortSpec { field, order }
}
