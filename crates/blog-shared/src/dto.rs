//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are optional so that a missing field surfaces as a
//! validation error rather than a deserialization failure.

use serde::{Deserialize, Serialize};

/// Author name pair as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorBody {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl AuthorBody {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
        }
    }
}

/// Request to create a post. Unknown keys such as `id` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<AuthorBody>,
}

/// Request to partially update a post. `id` must match the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<AuthorBody>,
}

/// Author as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub first_name: String,
    pub last_name: String,
}

/// A single post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: AuthorResponse,
}

/// Collection response for `GET /posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub blogs: Vec<PostResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_ignores_client_id() {
        let req: CreatePostRequest = serde_json::from_str(
            r#"{"id":"abc","title":"T","author":{"firstName":"A","lastName":"B"}}"#,
        )
        .unwrap();
        assert_eq!(req.title.as_deref(), Some("T"));
        assert!(req.content.is_none());
        assert_eq!(req.author, Some(AuthorBody::new("A", "B")));
    }

    #[test]
    fn test_post_response_keys() {
        let body = serde_json::to_value(PostResponse {
            id: "1".to_string(),
            title: "T".to_string(),
            content: "C".to_string(),
            author: AuthorResponse {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
            },
        })
        .unwrap();

        let mut keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["author", "content", "id", "title"]);
        assert_eq!(body["author"]["firstName"], "A");
        assert_eq!(body["author"]["lastName"], "B");
    }
}
