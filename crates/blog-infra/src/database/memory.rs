//! In-memory post repository - selected with a `memory://` database URL.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{BlogPost, NewPost, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

/// Post repository using a HashMap with async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, BlogPost>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored posts.
    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        let mut all: Vec<BlogPost> = posts.values().cloned().collect();
        all.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn get(&self, id: Uuid) -> Result<BlogPost, RepoError> {
        let posts = self.posts.read().await;
        posts.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn create(&self, post: NewPost) -> Result<BlogPost, RepoError> {
        let post = BlogPost::from_new(post);

        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        posts.insert(post.id, post.clone());

        tracing::debug!(post_id = %post.id, "Created post");
        Ok(post)
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        patch.apply_to(post);

        tracing::debug!(post_id = %id, "Updated post");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let removed = self.posts.write().await.remove(&id).is_some();
        tracing::debug!(post_id = %id, removed, "Deleted post");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::Author;

    fn draft(title: &str) -> NewPost {
        NewPost::new(title, "content", Author::new("Ada", "Lovelace").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(draft("First")).await.unwrap();

        let found = repo.get(created.id).await.unwrap();
        assert_eq!(found, created);
        assert_eq!(found.author.display_name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let err = repo.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_list_returns_every_post_in_creation_order() {
        let repo = InMemoryPostRepository::new();
        for i in 0..5 {
            repo.create(draft(&format!("Post {i}"))).await.unwrap();
        }

        let posts = repo.list().await.unwrap();
        assert_eq!(posts.len(), 5);
        assert_eq!(repo.len().await, 5);
        assert!(posts.windows(2).all(|w| w[0].created <= w[1].created));
    }

    #[tokio::test]
    async fn test_update_merges_supplied_fields() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(draft("Before")).await.unwrap();

        let patch = PostPatch::new(Some("After".to_string()), None, None).unwrap();
        repo.update(created.id, patch).await.unwrap();

        let found = repo.get(created.id).await.unwrap();
        assert_eq!(found.title, "After");
        assert_eq!(found.content, "content");
        assert_eq!(found.author, created.author);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let err = repo
            .update(Uuid::new_v4(), PostPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(draft("Doomed")).await.unwrap();

        repo.delete(created.id).await.unwrap();
        repo.delete(created.id).await.unwrap();

        assert!(repo.is_empty().await);
        assert!(matches!(
            repo.get(created.id).await,
            Err(RepoError::NotFound)
        ));
    }
}
