use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use time::Duration;
use tracing::info;

use crate::auth::repo::{PgUserRepo, UserRepo};
use crate::config::{AppConfig, SessionBackend};
use crate::groups::repo::{CatalogRepo, PgCatalogRepo};
use crate::session::{MemorySessionStore, PgSessionStore, SessionManager, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub catalog: Arc<dyn CatalogRepo>,
    pub sessions: SessionManager,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let store: Arc<dyn SessionStore> = match config.session.backend {
            SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
            SessionBackend::Postgres => Arc::new(PgSessionStore::new(db.clone())),
        };
        info!(backend = ?config.session.backend, ttl_hours = config.session.ttl_hours, "session store ready");
        let sessions = SessionManager::new(store, Duration::hours(config.session.ttl_hours));

        Ok(Self::from_parts(
            db.clone(),
            config,
            Arc::new(PgUserRepo::new(db.clone())),
            Arc::new(PgCatalogRepo::new(db)),
            sessions,
        ))
    }

    /// Applies the embedded schema; the app cannot serve without it.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        info!("migrations applied");
        Ok(())
    }

    pub fn from_parts(
        db: PgPool,
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepo>,
        catalog: Arc<dyn CatalogRepo>,
        sessions: SessionManager,
    ) -> Self {
        Self {
            db,
            config,
            users,
            catalog,
            sessions,
        }
    }
}
