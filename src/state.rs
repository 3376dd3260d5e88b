use std::sync::Arc;

use crate::auth::AuthStore;
use crate::config::AppConfig;
use crate::store::{KeyValueStore, MemoryStore, SqliteStore};

/// Everything the screens need, built once at startup and passed down
/// explicitly. There is no ambient global session; the auth store travels
/// with this state.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Real state: a SQLite-backed store at the configured location.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = SqliteStore::connect(&config.database_url).await?;
        let auth = AuthStore::open(Arc::new(store) as Arc<dyn KeyValueStore>).await?;
        Ok(Self { auth, config })
    }

    pub fn from_parts(auth: AuthStore, config: Arc<AppConfig>) -> Self {
        Self { auth, config }
    }

    /// In-memory state for tests; nothing touches the disk.
    pub async fn fake() -> Self {
        let store = Arc::new(MemoryStore::new()) as Arc<dyn KeyValueStore>;
        let auth = AuthStore::open(store)
            .await
            .expect("open auth store over the in-memory backing");
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
        });
        Self { auth, config }
    }
}
