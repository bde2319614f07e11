//! Application state - shared across all handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use quill_core::SyncCoordinator;
use quill_core::ports::PostStore;
use quill_infra::store::{DatabaseConfig, InMemoryPostStore};

#[cfg(feature = "postgres")]
use quill_infra::store::{PostgresPostStore, connect};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The sync coordinator behind one async lock. The lock also acts
    /// as the busy flag: a save cannot be re-triggered while one is
    /// outstanding.
    pub posts: Arc<RwLock<SyncCoordinator>>,
    /// The one address the gate admits.
    pub admin_email: String,
}

impl AppState {
    /// Build the application state with the appropriate store.
    pub async fn new(admin_email: String, db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let store: Arc<dyn PostStore> = match db_config {
            Some(config) => match connect(config).await {
                Ok(conn) => Arc::new(PostgresPostStore::new(conn)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Arc::new(InMemoryPostStore::new())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryPostStore::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let store: Arc<dyn PostStore> = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory store");
            Arc::new(InMemoryPostStore::new())
        };

        tracing::info!("Application state initialized");

        Self {
            posts: Arc::new(RwLock::new(SyncCoordinator::new(store))),
            admin_email,
        }
    }
}
