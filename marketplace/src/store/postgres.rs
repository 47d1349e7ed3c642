//! PostgreSQL-backed document store.
//!
//! All collections share one `documents` table holding JSONB bodies. Filters are translated to
//! SQL: equality becomes a JSONB comparison and regex conditions use PostgreSQL's `~`/`~*`
//! operators against the field's text value. The store lives in its own schema (the configured
//! database name), selected through `search_path` on every pooled connection.

use sqlx::{Executor, PgPool, Postgres, QueryBuilder, postgres::PgPoolOptions, types::Json};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    Document, DocumentStore, Filter, ID_FIELD, InsertedId,
    errors::{Result, StoreError},
    filter::Condition,
};

/// Get the document store migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing pool. The caller is responsible for schema selection and migrations.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect, create the schema if needed, and run migrations inside it.
    ///
    /// `schema` must be a plain identifier; configuration validation guarantees this.
    pub async fn connect(url: &str, schema: &str, options: PgPoolOptions) -> Result<Self> {
        if !is_plain_identifier(schema) {
            return Err(StoreError::Other(anyhow::anyhow!("invalid schema name {schema:?}")));
        }

        let search_path = format!("SET search_path = \"{schema}\"");
        let pool = options
            .after_connect(move |conn, _meta| {
                let search_path = search_path.clone();
                Box::pin(async move {
                    conn.execute(search_path.as_str()).await?;
                    Ok(())
                })
            })
            .connect(url)
            .await?;

        pool.execute(format!("CREATE SCHEMA IF NOT EXISTS \"{schema}\"").as_str()).await?;
        migrator().run(&pool).await?;
        info!(schema, "Document store migrations applied");

        Ok(Self { pool })
    }
}

pub(crate) fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name.len() <= 63
}

/// Translate a find request into SQL. Conditions are emitted in filter order.
fn build_find_query<'a>(collection: &'a str, filter: &'a Filter, limit: usize) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::new("SELECT id, body FROM documents WHERE collection = ");
    query.push_bind(collection);

    for (field, condition) in filter.conditions() {
        match condition {
            Condition::Eq(value) => {
                query
                    .push(" AND COALESCE(body -> ")
                    .push_bind(field.as_str())
                    .push(", 'null'::jsonb) = ")
                    .push_bind(Json(value.clone()));
            }
            Condition::Regex {
                pattern,
                case_insensitive,
            } => {
                query
                    .push(" AND jsonb_typeof(body -> ")
                    .push_bind(field.as_str())
                    .push(") = 'string' AND body ->> ")
                    .push_bind(field.as_str())
                    .push(if *case_insensitive { " ~* " } else { " ~ " })
                    .push_bind(pattern.as_str());
            }
        }
    }

    query
        .push(" ORDER BY seq LIMIT ")
        .push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
    query
}

#[async_trait::async_trait]
impl DocumentStore for PostgresStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    #[instrument(skip(self, document), err)]
    async fn insert(&self, collection: &str, mut document: Document) -> Result<InsertedId> {
        let id = Uuid::new_v4();
        document.remove(ID_FIELD);

        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(Json(&document))
            .execute(&self.pool)
            .await?;

        Ok(InsertedId::new(id.to_string()))
    }

    #[instrument(skip(self, filter), fields(filter = %filter.to_json()), err)]
    async fn find(&self, collection: &str, filter: &Filter, limit: usize) -> Result<Vec<Document>> {
        // Reject patterns the in-memory backend would reject, so both backends agree on validity
        filter.compile()?;

        let mut query = build_find_query(collection, filter, limit);
        let rows: Vec<(Uuid, Json<Document>)> = query.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|(id, Json(mut body))| {
                body.insert(ID_FIELD.to_string(), serde_json::Value::String(id.to_string()));
                body
            })
            .collect())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>("SELECT DISTINCT collection FROM documents ORDER BY collection")
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
