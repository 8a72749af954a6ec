use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, NewPost, PostPatch};
use crate::error::RepoError;

/// Post repository - the single collection of blog posts.
///
/// Implementations own the persisted records; callers only ever see copies.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Every stored post, oldest first.
    async fn list(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// Find a post by id. Returns `RepoError::NotFound` when absent.
    async fn get(&self, id: Uuid) -> Result<BlogPost, RepoError>;

    /// Insert a new post. The store assigns `id` and `created`.
    async fn create(&self, post: NewPost) -> Result<BlogPost, RepoError>;

    /// Merge the supplied fields into an existing post.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<(), RepoError>;

    /// Remove a post. Removing an absent post is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Release the underlying connection.
    async fn close(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
