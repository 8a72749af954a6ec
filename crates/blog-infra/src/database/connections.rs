use std::sync::Arc;

use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::memory::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use super::postgres_repo::PostgresPostRepository;

/// URL selecting the in-process store.
pub const MEMORY_URL: &str = "memory://";

/// Configuration for the post store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Config with default pool sizes.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.starts_with(MEMORY_URL)
    }

    /// URL scheme, safe to log (the full URL may carry credentials).
    pub fn scheme(&self) -> &str {
        self.url.split("://").next().unwrap_or_default()
    }
}

/// Open the store named by `config.url`.
///
/// Fails fast when the store is unreachable; there is no fallback store.
pub async fn connect_repository(
    config: &DatabaseConfig,
) -> Result<Arc<dyn PostRepository>, RepoError> {
    tracing::info!(scheme = %config.scheme(), "Connecting post store...");

    if config.is_in_memory() {
        return Ok(Arc::new(InMemoryPostRepository::new()));
    }

    #[cfg(feature = "postgres")]
    {
        let repo = PostgresPostRepository::connect(config).await?;
        Ok(Arc::new(repo))
    }

    #[cfg(not(feature = "postgres"))]
    {
        Err(RepoError::Connection(format!(
            "unsupported store scheme '{}' (built without the postgres feature)",
            config.scheme()
        )))
    }
}
