//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use postboard_core::domain::Post;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// Body of `POST /api/v1/posts`.
///
/// Missing and `null` fields read as empty so they fail validation per field
/// instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostWriteRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank"),
        length(min = 2, max = 10, message = "must be between 2 and 10 characters")
    )]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank"),
        length(min = 2, max = 100, message = "must be between 2 and 100 characters")
    )]
    pub content: String,
}

/// Body of `PUT /api/v1/posts/{id}`.
///
/// Deliberately unvalidated: either field may be missing or empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostModifyRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Public view of a post. Field names differ from the entity on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: i64,
    pub subject: String,
    pub body: String,
    pub create_date: DateTime<Utc>,
    pub modify_date: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            subject: post.title,
            body: post.content,
            create_date: post.created_at,
            modify_date: post.modified_at,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}
