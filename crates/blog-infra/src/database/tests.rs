#[cfg(test)]
mod tests {
    use blog_core::domain::{Author, NewPost, PostPatch};
    use blog_core::error::RepoError;
    use blog_core::ports::PostRepository;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use crate::database::entity::post::{self, AuthorDocument};
    use crate::database::postgres_repo::PostgresPostRepository;

    fn model(title: &str) -> post::Model {
        post::Model {
            id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            content: "Content".to_owned(),
            author: AuthorDocument {
                first_name: "Ada".to_owned(),
                last_name: "Lovelace".to_owned(),
            },
            created: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_post_by_id() {
        let row = model("Test Post");
        let post_id = row.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let post = repo.get(post_id).await.unwrap();

        assert_eq!(post.id, post_id);
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.author.display_name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let err = repo.get(uuid::Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_list_posts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model("One"), model("Two"), model("Three")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let posts = repo.list().await.unwrap();

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[1].title, "Two");
    }

    #[tokio::test]
    async fn test_create_post_returns_stored_row() {
        let row = model("Fresh");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row.clone()]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let draft =
            NewPost::new("Fresh", "Content", Author::new("Ada", "Lovelace").unwrap()).unwrap();
        let created = repo.create(draft).await.unwrap();

        assert_eq!(created.id, row.id);
        assert_eq!(created.title, "Fresh");
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let patch = PostPatch::new(Some("New".to_string()), None, None).unwrap();
        let err = repo.update(uuid::Uuid::new_v4(), patch).await.unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_update_existing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let patch = PostPatch::new(None, Some("Edited".to_string()), None).unwrap();

        repo.update(uuid::Uuid::new_v4(), patch).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_absent_post_succeeds() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        repo.delete(uuid::Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test]
    async fn test_close_releases_connection() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let repo = PostgresPostRepository::new(db);
        repo.close().await.unwrap();
    }
}
