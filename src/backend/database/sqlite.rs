/**
 * SQLite Store
 *
 * `RecordStore` backed by sqlx and SQLite. All collections share the
 * `records` table created by the migrations in `migrations/`; the domain
 * fields of a record are a JSON object in the `data` column and are queried
 * with SQLite's JSON1 functions.
 *
 * # Indexes
 *
 * Each `IndexSpec` becomes a partial expression index, for example
 *
 * ```sql
 * CREATE UNIQUE INDEX IF NOT EXISTS ux_users_email
 *     ON records (json_extract(data, '$.email')) WHERE collection = 'users'
 * ```
 *
 * SQLite treats NULLs as distinct in unique indexes, so records missing an
 * indexed field never collide.
 *
 * # Timeouts
 *
 * The configured timeout bounds both connection acquisition and every
 * statement. Expiry is reported as `StoreError::Unavailable`.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use super::adapter::{IndexSpec, RecordStore, StoreError, StoredRecord};
use super::record::{is_plain_field, Document, Filter};

const SELECT_RECORD: &str = "SELECT id, data, created_at, updated_at FROM records WHERE collection = ";

#[derive(Debug, sqlx::FromRow)]
struct RecordRow {
    id: String,
    data: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RecordRow {
    fn into_stored(self, collection: &str) -> Result<StoredRecord, StoreError> {
        let corrupt = |reason: String| StoreError::Corrupt {
            collection: collection.to_string(),
            id: self.id.clone(),
            reason,
        };

        let id = Uuid::parse_str(&self.id).map_err(|e| corrupt(e.to_string()))?;
        let fields: Document = serde_json::from_str(&self.data).map_err(|e| corrupt(e.to_string()))?;

        Ok(StoredRecord {
            id,
            fields,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SQLite-backed record store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteStore {
    /// Open the database, creating the file if needed, and run migrations
    ///
    /// # Arguments
    /// * `url` - `sqlite:<path>` or `sqlite::memory:`
    /// * `timeout` - bound on acquiring a connection and on each statement
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StoreError::Unavailable(format!("invalid database URL: {}", e)))?
            .create_if_missing(true)
            .busy_timeout(timeout);

        // An in-memory database lives and dies with its connection.
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(10)
        };

        let pool = pool_options
            .acquire_timeout(timeout)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("migration failed: {}", e)))?;

        Ok(Self { pool, timeout })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every connection; subsequent operations report `Unavailable`
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn bounded<T, F>(&self, collection: &str, operation: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => result.map_err(|e| map_sqlx_error(collection, e)),
            Err(_) => Err(StoreError::Unavailable(format!(
                "operation on {} timed out after {:?}",
                collection, self.timeout
            ))),
        }
    }
}

fn map_sqlx_error(collection: &str, err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateKey {
            collection: collection.to_string(),
            index: index_from_message(db.message()),
        },
        _ => StoreError::Unavailable(err.to_string()),
    }
}

/// Pull the index name out of "UNIQUE constraint failed: index 'ux_users_email'"
fn index_from_message(message: &str) -> String {
    message
        .split('\'')
        .nth(1)
        .map(str::to_string)
        .unwrap_or_else(|| "unique".to_string())
}

fn json_path(field: &str) -> String {
    format!("$.{}", field)
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &Filter) {
    for (field, value) in filter.iter() {
        let path = json_path(field);
        builder.push(" AND ");
        match value {
            Value::Null => {
                builder
                    .push("(json_type(data, ")
                    .push_bind(path.clone())
                    .push(") IS NULL OR json_type(data, ")
                    .push_bind(path)
                    .push(") = 'null')");
            }
            Value::Bool(flag) => {
                builder
                    .push("json_type(data, ")
                    .push_bind(path)
                    .push(if *flag { ") = 'true'" } else { ") = 'false'" });
            }
            Value::Number(number) => {
                builder
                    .push("json_type(data, ")
                    .push_bind(path.clone())
                    .push(") IN ('integer', 'real') AND json_extract(data, ")
                    .push_bind(path)
                    .push(") = ");
                match number.as_i64() {
                    Some(n) => builder.push_bind(n),
                    None => builder.push_bind(number.as_f64().unwrap_or(f64::NAN)),
                };
            }
            Value::String(text) => {
                builder
                    .push("json_type(data, ")
                    .push_bind(path.clone())
                    .push(") = 'text' AND json_extract(data, ")
                    .push_bind(path)
                    .push(") = ")
                    .push_bind(text.clone());
            }
            Value::Array(_) | Value::Object(_) => {
                builder
                    .push("json_extract(data, ")
                    .push_bind(path)
                    .push(") = json(")
                    .push_bind(value.to_string())
                    .push(")");
            }
        }
    }
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl RecordStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.bounded(
            "ping",
            sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(&self.pool),
        )
        .await
        .map(|_| ())
    }

    async fn ensure_index(&self, index: &IndexSpec) -> Result<(), StoreError> {
        if !is_plain_field(index.collection) || !index.fields.iter().all(|f| is_plain_field(f)) {
            return Err(StoreError::InvalidRequest(format!(
                "index {} uses a non-identifier name",
                index.name()
            )));
        }

        let columns = index
            .fields
            .iter()
            .map(|field| format!("json_extract(data, '{}')", json_path(field)))
            .collect::<Vec<_>>()
            .join(", ");
        let statement = format!(
            "CREATE {}INDEX IF NOT EXISTS {} ON records ({}) WHERE collection = '{}'",
            if index.unique { "UNIQUE " } else { "" },
            index.name(),
            columns,
            index.collection,
        );

        self.bounded(index.collection, sqlx::query(&statement).execute(&self.pool))
            .await
            .map(|_| ())
    }

    async fn insert(&self, collection: &str, record: StoredRecord) -> Result<(), StoreError> {
        let data = serde_json::to_string(&record.fields)
            .map_err(|e| StoreError::InvalidRequest(e.to_string()))?;

        let query = sqlx::query(
            "INSERT INTO records (collection, id, data, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(collection)
        .bind(record.id.to_string())
        .bind(data)
        .bind(record.created_at)
        .bind(record.updated_at);

        self.bounded(collection, query.execute(&self.pool))
            .await
            .map(|_| ())
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<StoredRecord>, StoreError> {
        let sql = format!("{}? AND id = ?", SELECT_RECORD);
        let query = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(collection)
            .bind(id.to_string());

        self.bounded(collection, query.fetch_optional(&self.pool))
            .await?
            .map(|row| row.into_stored(collection))
            .transpose()
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_RECORD);
        builder.push_bind(collection.to_string());
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY seq LIMIT ")
            .push_bind(to_i64(limit))
            .push(" OFFSET ")
            .push_bind(to_i64(skip));

        let query = builder.build_query_as::<RecordRow>();
        self.bounded(collection, query.fetch_all(&self.pool))
            .await?
            .into_iter()
            .map(|row| row.into_stored(collection))
            .collect()
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        changes: &Document,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE records SET updated_at = ");
        builder.push_bind(updated_at);

        if !changes.is_empty() {
            builder.push(", data = json_set(data");
            for (field, value) in changes {
                if !is_plain_field(field) {
                    return Err(StoreError::InvalidRequest(format!(
                        "cannot update field {:?}",
                        field
                    )));
                }
                builder
                    .push(", ")
                    .push_bind(json_path(field))
                    .push(", json(")
                    .push_bind(value.to_string())
                    .push(")");
            }
            builder.push(")");
        }

        builder
            .push(" WHERE collection = ")
            .push_bind(collection.to_string())
            .push(" AND id = ")
            .push_bind(id.to_string());

        let result = self
            .bounded(collection, builder.build().execute(&self.pool))
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        let query = sqlx::query("DELETE FROM records WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id.to_string());

        let result = self.bounded(collection, query.execute(&self.pool)).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let mut builder =
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM records WHERE collection = ");
        builder.push_bind(collection.to_string());
        push_filter(&mut builder, filter);

        let query = builder.build_query_scalar::<i64>();
        let count = self.bounded(collection, query.fetch_one(&self.pool)).await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
