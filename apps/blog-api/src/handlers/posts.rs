//! Blog post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{Author, BlogPost, NewPost, PostPatch};
use blog_core::error::{DomainError, RepoError};
use blog_shared::dto::{
    AuthorBody, AuthorResponse, CreatePostRequest, PostListResponse, PostResponse,
    UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

fn to_response(post: BlogPost) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        content: post.content,
        author: AuthorResponse {
            first_name: post.author.first_name,
            last_name: post.author.last_name,
        },
    }
}

fn to_author(body: AuthorBody) -> Result<Author, DomainError> {
    Author::new(
        body.first_name.unwrap_or_default(),
        body.last_name.unwrap_or_default(),
    )
}

fn post_not_found(id: &str) -> AppError {
    DomainError::NotFound {
        entity_type: "Post",
        id: id.to_string(),
    }
    .into()
}

/// Repository errors for a single post, with the id in the 404 detail.
fn post_error(id: &str) -> impl FnOnce(RepoError) -> AppError + '_ {
    move |err| match err {
        RepoError::NotFound => post_not_found(id),
        other => other.into(),
    }
}

/// Path and body ids name the same post. UUIDs compare by value, so case and
/// hyphenation do not matter; anything else must match exactly.
fn same_post_id(path_id: &str, body_id: Option<&str>) -> bool {
    let Some(body_id) = body_id else {
        return false;
    };
    match (Uuid::parse_str(path_id), Uuid::parse_str(body_id)) {
        (Ok(path_uuid), Ok(body_uuid)) => path_uuid == body_uuid,
        _ => path_id == body_id,
    }
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        blogs: posts.into_iter().map(to_response).collect(),
    }))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw_id = path.into_inner();
    // A malformed id cannot name a stored post
    let id = Uuid::parse_str(&raw_id).map_err(|_| post_not_found(&raw_id))?;

    let post = state.posts.get(id).await.map_err(post_error(&raw_id))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let title = req
        .title
        .ok_or_else(|| DomainError::Validation("title is required".to_string()))?;
    let author = req
        .author
        .ok_or_else(|| DomainError::Validation("author is required".to_string()))?;
    let draft = NewPost::new(title, req.content.unwrap_or_default(), to_author(author)?)?;

    let post = state.posts.create(draft).await?;
    tracing::info!(
        request_id = %request_id.as_str(),
        post_id = %post.id,
        author = %post.author,
        "Post created"
    );

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let raw_id = path.into_inner();
    let req = body.into_inner();

    if !same_post_id(&raw_id, req.id.as_deref()) {
        return Err(AppError::BadRequest(format!(
            "Request path id ({}) and request body id ({}) must match",
            raw_id,
            req.id.as_deref().unwrap_or("missing")
        )));
    }

    let patch = PostPatch::new(req.title, req.content, req.author.map(to_author).transpose()?)?;
    let id = Uuid::parse_str(&raw_id).map_err(|_| post_not_found(&raw_id))?;

    state
        .posts
        .update(id, patch)
        .await
        .map_err(post_error(&raw_id))?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
///
/// Idempotent: an absent or malformed id still answers 204.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    if let Ok(id) = Uuid::parse_str(&path) {
        state.posts.delete(id).await?;
    }

    Ok(HttpResponse::NoContent().finish())
}
