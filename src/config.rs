use serde::Deserialize;

/// Runtime configuration, environment-driven.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
}

impl AppConfig {
    /// Read configuration from the environment, loading `.env` first when
    /// present. `DATABASE_URL` defaults to a SQLite file next to the app.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://resumefixer.db".into());
        Ok(Self { database_url })
    }
}
