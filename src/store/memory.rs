//! In-memory backend: per-collection insertion-ordered vectors. Backs the
//! test suites and the zero-setup server mode.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::query::{FilterSpec, Predicate, SortOrder, SortSpec};

use super::{Document, DocumentStore, StoreError, ID_FIELD};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<(Uuid, Document)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A filter clause compiled for evaluation. Contains-matching uses an
/// escaped case-insensitive regex, so the raw value matches literally.
enum Matcher {
    Contains(String, Regex),
    Eq(String, Value),
}

fn compile(filter: &FilterSpec) -> Result<Vec<Matcher>, StoreError> {
    filter
        .clauses
        .iter()
        .map(|(field, pred)| match pred {
            Predicate::Contains(lit) => {
                let re = RegexBuilder::new(&regex::escape(lit))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| StoreError::Backend(e.to_string()))?;
                Ok(Matcher::Contains(field.clone(), re))
            }
            Predicate::Eq(v) => Ok(Matcher::Eq(field.clone(), v.clone())),
        })
        .collect()
}

fn matches(doc: &Document, matchers: &[Matcher]) -> bool {
    matchers.iter().all(|m| match m {
        Matcher::Contains(field, re) => match doc.get(field) {
            Some(Value::String(s)) => re.is_match(s),
            _ => false,
        },
        Matcher::Eq(field, v) => doc.get(field) == Some(v),
    })
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Order two field values: absent before present, then by type rank, then by
/// value within a type. Incomparable pairs count as equal, which keeps the
/// stable sort's insertion order.
fn cmp_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match type_rank(a).cmp(&type_rank(b)) {
            Ordering::Equal => match (a, b) {
                (Value::Number(x), Value::Number(y)) => x
                    .as_f64()
                    .partial_cmp(&y.as_f64())
                    .unwrap_or(Ordering::Equal),
                (Value::String(x), Value::String(y)) => x.cmp(y),
                (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
                _ => Ordering::Equal,
            },
            other => other,
        },
    }
}

fn with_id(id: Uuid, doc: &Document) -> Document {
    let mut out = doc.clone();
    out.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    out
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: &str,
        filter: &FilterSpec,
        sort: &SortSpec,
    ) -> Result<Vec<Document>, StoreError> {
        let matchers = compile(filter)?;
        let collections = self.collections.read().await;
        let mut rows: Vec<Document> = collections
            .get(collection)
            .into_iter()
            .flatten()
            .filter(|(_, doc)| matches(doc, &matchers))
            .map(|(id, doc)| with_id(*id, doc))
            .collect();
        // Stable sort: equal keys (and unknown sort fields, where every key
        // is absent) keep insertion order.
        rows.sort_by(|a, b| {
            let ord = cmp_field(a.get(&sort.field), b.get(&sort.field));
            match sort.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        Ok(rows)
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|rows| rows.iter().find(|(row_id, _)| *row_id == id))
            .map(|(id, doc)| with_id(*id, doc)))
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id, doc));
        Ok(id)
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(rows) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match rows.iter().position(|(row_id, _)| *row_id == id) {
            Some(idx) => {
                rows.remove(idx);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: serde_json::Value) -> Document {
        v.as_object().unwrap().clone()
    }

    fn contains(field: &str, lit: &str) -> FilterSpec {
        FilterSpec {
            clauses: vec![(field.to_string(), Predicate::Contains(lit.to_string()))],
        }
    }

    fn sort(field: &str, order: SortOrder) -> SortSpec {
        SortSpec { field: field.to_string(), order }
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for name in ["Corn syrup", "peas snow", "Snow Peas", "corned beef"] {
            store
                .insert("products", doc(json!({"productName": name})))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn contains_is_case_insensitive_substring() {
        let store = seeded().await;
        let rows = store
            .find("products", &contains("productName", "snow"), &sort("productName", SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn contains_treats_metacharacters_literally() {
        let store = MemoryStore::new();
        store
            .insert("products", doc(json!({"productName": "beans (dry)"})))
            .await
            .unwrap();
        store
            .insert("products", doc(json!({"productName": "beans x dry"})))
            .await
            .unwrap();
        let rows = store
            .find("products", &contains("productName", "(dry)"), &sort("productName", SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["productName"], json!("beans (dry)"));
    }

    #[tokio::test]
    async fn unknown_sort_field_preserves_insertion_order() {
        let store = seeded().await;
        let rows = store
            .find("products", &FilterSpec::default(), &sort("nonexistent", SortOrder::Desc))
            .await
            .unwrap();
        let names: Vec<_> = rows.iter().map(|r| r["productName"].clone()).collect();
        assert_eq!(
            names,
            vec![
                json!("Corn syrup"),
                json!("peas snow"),
                json!("Snow Peas"),
                json!("corned beef")
            ]
        );
    }

    #[tokio::test]
    async fn equal_sort_keys_keep_insertion_order() {
        let store = MemoryStore::new();
        for (name, n) in [("a", 1), ("b", 1), ("c", 1)] {
            store
                .insert("items", doc(json!({"name": name, "quantity": n})))
                .await
                .unwrap();
        }
        let rows = store
            .find("items", &FilterSpec::default(), &sort("quantity", SortOrder::Desc))
            .await
            .unwrap();
        let names: Vec<_> = rows.iter().map(|r| r["name"].clone()).collect();
        assert_eq!(names, vec![json!("a"), json!("b"), json!("c")]);
    }

    #[tokio::test]
    async fn delete_reports_count_and_removes_one() {
        let store = seeded().await;
        let rows = store
            .find("products", &FilterSpec::default(), &sort("productName", SortOrder::Asc))
            .await
            .unwrap();
        let id: Uuid = rows[0]["id"].as_str().unwrap().parse().unwrap();
        assert_eq!(store.delete_by_id("products", id).await.unwrap(), 1);
        assert_eq!(store.delete_by_id("products", id).await.unwrap(), 0);
        assert!(store.find_by_id("products", id).await.unwrap().is_none());
    }
}
