//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::ports::PostRepository;
use postboard_core::{DomainError, PostService};
use postboard_infra::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use postboard_infra::{DatabaseConnections, PostgresPostRepository};

use crate::config::AppConfig;

/// Posts a fresh instance starts with.
const SAMPLE_POSTS: [(&str, &str); 3] = [
    ("제목 1", "내용 1"),
    ("제목 2", "내용 2"),
    ("제목 3", "내용 3"),
];

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            posts: PostService::new(repo),
        }
    }

    /// Build the application state with the appropriate store, then seed it.
    pub async fn from_config(config: &AppConfig) -> Self {
        let state = Self::new(Self::select_store(config).await);

        if config.seed_sample_posts {
            if let Err(e) = state.seed_sample_posts().await {
                tracing::error!("Failed to seed sample posts: {}", e);
            }
        }

        tracing::info!("Application state initialized");
        state
    }

    #[cfg(feature = "postgres")]
    async fn select_store(config: &AppConfig) -> Arc<dyn PostRepository> {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryPostRepository::new());
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => Arc::new(PostgresPostRepository::new(connections.main)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryPostRepository::new())
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn select_store(_config: &AppConfig) -> Arc<dyn PostRepository> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Arc::new(InMemoryPostRepository::new())
    }

    /// Insert the sample posts, but only into an empty store.
    pub async fn seed_sample_posts(&self) -> Result<(), DomainError> {
        if self.posts.count().await? > 0 {
            tracing::debug!("Store not empty, skipping sample posts");
            return Ok(());
        }

        for (title, content) in SAMPLE_POSTS {
            self.posts.write(title.into(), content.into()).await?;
        }
        tracing::info!(count = SAMPLE_POSTS.len(), "Seeded sample posts");
        Ok(())
    }
}
