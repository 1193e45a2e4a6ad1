//! PostgreSQL backend: one jsonb-document table per collection.
//!
//! Layout per collection: `id uuid` (store-assigned), `seq bigserial`
//! (insertion order, the sort tie-break), `doc jsonb` (the declared fields).
//! Filter and sort specs compile to SQL; jsonb ordering compares numbers
//! numerically and strings lexically, and an unknown sort field yields NULL
//! for every row, so ordering falls through to `seq`.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::query::{FilterSpec, Predicate, SortOrder, SortSpec};
use crate::schema::Model;

use super::{Document, DocumentStore, StoreError, ID_FIELD};

pub struct PgStore {
    pool: PgPool,
}

/// Quote identifier (names come from the compiled-in catalog).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Escape LIKE metacharacters so the literal matches itself.
fn like_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    /// Idempotent DDL for every collection in the model, run at startup.
    pub async fn ensure_collections(&self, model: &Model) -> Result<(), StoreError> {
        for schema in model.schemas() {
            let ddl = format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    seq BIGSERIAL,
                    doc JSONB NOT NULL
                )
                "#,
                quoted(schema.collection)
            );
            tracing::debug!(collection = schema.collection, "ensure collection table");
            sqlx::query(&ddl).execute(&self.pool).await?;
        }
        Ok(())
    }

    fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &FilterSpec) {
        for (field, pred) in &filter.clauses {
            match pred {
                Predicate::Contains(lit) => {
                    qb.push(" AND doc->>");
                    qb.push_bind(field.clone());
                    qb.push(" ILIKE ");
                    qb.push_bind(format!("%{}%", like_escape(lit)));
                }
                Predicate::Eq(v) => {
                    qb.push(" AND doc->");
                    qb.push_bind(field.clone());
                    qb.push(" = ");
                    qb.push_bind(v.clone());
                }
            }
        }
    }
}

fn row_to_document(row: &sqlx::postgres::PgRow) -> Result<Document, StoreError> {
    let id: Uuid = row.try_get("id")?;
    let doc: Value = row.try_get("doc")?;
    let mut map = match doc {
        Value::Object(m) => m,
        other => {
            return Err(StoreError::Backend(format!(
                "expected jsonb object in doc column, got {}",
                other
            )))
        }
    };
    map.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    Ok(map)
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn find(
        &self,
        collection: &str,
        filter: &FilterSpec,
        sort: &SortSpec,
    ) -> Result<Vec<Document>, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT id, doc FROM {} WHERE TRUE",
            quoted(collection)
        ));
        Self::push_filter(&mut qb, filter);
        qb.push(" ORDER BY doc->");
        qb.push_bind(sort.field.clone());
        qb.push(match sort.order {
            SortOrder::Asc => " ASC",
            SortOrder::Desc => " DESC",
        });
        qb.push(", seq ASC");

        tracing::debug!(sql = %qb.sql(), collection, "find");
        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_document).collect()
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError> {
        let sql = format!("SELECT id, doc FROM {} WHERE id = $1", quoted(collection));
        tracing::debug!(sql = %sql, %id, "find_by_id");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(row_to_document).transpose()
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<Uuid, StoreError> {
        let sql = format!(
            "INSERT INTO {} (doc) VALUES ($1) RETURNING id",
            quoted(collection)
        );
        tracing::debug!(sql = %sql, collection, "insert");
        let row = sqlx::query(&sql)
            .bind(Value::Object(doc))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("id")?)
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> Result<u64, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", quoted(collection));
        tracing::debug!(sql = %sql, %id, "delete_by_id");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_escape_neutralizes_wildcards() {
        assert_eq!(like_escape("100%_a\\b"), "100\\%\\_a\\\\b");
        assert_eq!(like_escape("plain"), "plain");
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quoted("shoppingList"), "\"shoppingList\"");
    }
}
