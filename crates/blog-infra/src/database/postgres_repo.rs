//! PostgreSQL post repository.

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DbConn, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Schema, Set,
};
use uuid::Uuid;

use blog_core::domain::{BlogPost, NewPost, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::connections::DatabaseConfig;
use super::entity::post::{self, Entity as PostEntity};

/// Post repository backed by a PostgreSQL `posts` table.
pub struct PostgresPostRepository {
    pub(crate) db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Open a pooled connection and make sure the `posts` table exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepoError> {
        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let db = Database::connect(opts)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        tracing::info!(
            "PostgreSQL store connected (pool: {})",
            config.max_connections
        );

        let repo = Self::new(db);
        repo.ensure_table().await?;
        Ok(repo)
    }

    async fn ensure_table(&self) -> Result<(), RepoError> {
        let backend = self.db.get_database_backend();
        let mut stmt = Schema::new(backend).create_table_from_entity(PostEntity);
        stmt.if_not_exists();

        self.db
            .execute(backend.build(&stmt))
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        Ok(())
    }
}

fn query_error(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self) -> Result<Vec<BlogPost>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Created)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        tracing::debug!(count = result.len(), "Listed posts");
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: Uuid) -> Result<BlogPost, RepoError> {
        PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn create(&self, new_post: NewPost) -> Result<BlogPost, RepoError> {
        let active_model: post::ActiveModel = BlogPost::from_new(new_post).into();
        let model = active_model.insert(&self.db).await.map_err(query_error)?;

        tracing::debug!(post_id = %model.id, "Created post");
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<(), RepoError> {
        if patch.is_empty() {
            return self.get(id).await.map(|_| ());
        }

        let mut active_model = <post::ActiveModel as ActiveModelTrait>::default();
        if let Some(title) = patch.title() {
            active_model.title = Set(title.to_string());
        }
        if let Some(content) = patch.content() {
            active_model.content = Set(content.to_string());
        }
        if let Some(author) = patch.author() {
            active_model.author = Set(author.clone().into());
        }

        let result = PostEntity::update_many()
            .set(active_model)
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = %id, "Updated post");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        tracing::debug!(
            post_id = %id,
            removed = result.rows_affected,
            "Deleted post"
        );
        Ok(())
    }

    async fn close(&self) -> Result<(), RepoError> {
        self.db
            .close_by_ref()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))
    }
}
