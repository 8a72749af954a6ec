use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Author of a post, stored as a structured name pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// Build an author, rejecting blank name parts.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let first_name = first_name.into();
        let last_name = last_name.into();

        if first_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "author.firstName is required".to_string(),
            ));
        }
        if last_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "author.lastName is required".to_string(),
            ));
        }

        Ok(Self {
            first_name,
            last_name,
        })
    }

    /// "firstName lastName"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Post entity - a persisted blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Materialize a new post with a fresh id and creation time.
    pub fn from_new(post: NewPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            author: post.author,
            created: Utc::now(),
        }
    }
}

/// Validated input for creating a post.
///
/// Only constructible through [`NewPost::new`], so a store never sees a post
/// without a title or author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
    author: Author,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: Author,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::Validation("title is required".to_string()));
        }

        Ok(Self {
            title,
            content: content.into(),
            author,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &Author {
        &self.author
    }
}

/// Partial update of a post. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    title: Option<String>,
    content: Option<String>,
    author: Option<Author>,
}

impl PostPatch {
    pub fn new(
        title: Option<String>,
        content: Option<String>,
        author: Option<Author>,
    ) -> Result<Self, DomainError> {
        if title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(DomainError::Validation(
                "title cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            title,
            content,
            author,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none()
    }

    /// Merge the supplied fields into `post`.
    pub fn apply_to(self, post: &mut BlogPost) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
    }
}
