use anyhow::Context;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::store::KeyValueStore;

/// Key holding the whole user collection, a JSON array, newest first.
pub(crate) const USERS_KEY: &str = "USERS";
/// Key holding the current session record; absent while logged out.
pub(crate) const SESSION_KEY: &str = "SESSION_USER";

/// A registered user as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Derived from the creation timestamp; uniqueness is best-effort.
    pub id: String,
    pub name: String,
    /// Login key. Stored with its original casing; uniqueness is enforced
    /// case-insensitively at registration and never changes afterwards.
    pub email: String,
    pub password_hash: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    /// Load the whole collection. An absent key reads as an empty one.
    pub(crate) async fn load_all(store: &dyn KeyValueStore) -> anyhow::Result<Vec<User>> {
        match store.get(USERS_KEY).await? {
            Some(raw) => serde_json::from_str(&raw).context("decode stored user collection"),
            None => Ok(Vec::new()),
        }
    }

    /// Persist the whole collection; every mutation rewrites it in full.
    pub(crate) async fn save_all(store: &dyn KeyValueStore, users: &[User]) -> anyhow::Result<()> {
        let raw = serde_json::to_string(users).context("encode user collection")?;
        store.set(USERS_KEY, &raw).await
    }

    pub(crate) async fn load_session(store: &dyn KeyValueStore) -> anyhow::Result<Option<User>> {
        match store.get(SESSION_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .context("decode stored session"),
            None => Ok(None),
        }
    }

    pub(crate) async fn save_session(store: &dyn KeyValueStore, user: &User) -> anyhow::Result<()> {
        let raw = serde_json::to_string(user).context("encode session record")?;
        store.set(SESSION_KEY, &raw).await
    }

    pub(crate) async fn clear_session(store: &dyn KeyValueStore) -> anyhow::Result<()> {
        store.remove(SESSION_KEY).await
    }
}
