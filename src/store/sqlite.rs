use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::debug;

use crate::store::KeyValueStore;

/// Key-value backing over a local SQLite database, one row per key.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `url` (e.g. `sqlite://resumefixer.db`), creating the file
    /// and the table on first use.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .context("parse sqlite url")?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("connect to sqlite store")?;
        Self::bootstrap(&pool).await?;
        Ok(Self { pool })
    }

    /// Private in-memory database; its contents die with this store.
    pub async fn in_memory() -> anyhow::Result<Self> {
        // one connection only: every new `:memory:` connection is a fresh,
        // empty database
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").context("parse sqlite url")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .context("connect to in-memory sqlite store")?;
        Self::bootstrap(&pool).await?;
        Ok(Self { pool })
    }

    async fn bootstrap(pool: &SqlitePool) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_entries (
                key   TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .context("create kv_entries table")?;
        debug!("sqlite store ready");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            r#"SELECT value FROM kv_entries WHERE key = ?1"#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .context("kv get")?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .context("kv set")?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM kv_entries WHERE key = ?1"#)
            .bind(key)
            .execute(&self.pool)
            .await
            .context("kv remove")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn roundtrips_values() {
        let store = SqliteStore::in_memory().await.expect("open store");
        assert_eq!(store.get("k").await.expect("get"), None);
        store.set("k", "v").await.expect("set");
        assert_eq!(store.get("k").await.expect("get"), Some("v".to_string()));
    }

    #[tokio::test]
    async fn upsert_replaces_value_in_full() {
        let store = SqliteStore::in_memory().await.expect("open store");
        store.set("k", r#"{"a":1}"#).await.expect("set");
        store.set("k", r#"{"b":2}"#).await.expect("set again");
        assert_eq!(
            store.get("k").await.expect("get"),
            Some(r#"{"b":2}"#.to_string())
        );
    }

    #[tokio::test]
    async fn remove_clears_key_and_tolerates_missing() {
        let store = SqliteStore::in_memory().await.expect("open store");
        store.remove("absent").await.expect("remove missing");
        store.set("k", "v").await.expect("set");
        store.remove("k").await.expect("remove");
        assert_eq!(store.get("k").await.expect("get"), None);
    }

    #[tokio::test]
    async fn connect_creates_file_and_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite://{}/kv.db", dir.path().display());

        {
            let store = SqliteStore::connect(&url).await.expect("first connect");
            store.set("k", "v").await.expect("set");
        }

        let store = SqliteStore::connect(&url).await.expect("reconnect");
        assert_eq!(store.get("k").await.expect("get"), Some("v".to_string()));
    }
}
