use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a titled text body with timestamps.
///
/// `id` is assigned by the store and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Post {
    /// Replace title and content, refreshing `modified_at`.
    pub fn modify(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
        // Clock skew must never put modified_at before created_at.
        self.modified_at = Utc::now().max(self.created_at);
    }
}

/// A post that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post stamped with the current time.
    pub fn new(title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            title,
            content,
            created_at: now,
            modified_at: now,
        }
    }

    /// Attach the store-assigned id.
    pub fn into_post(self, id: i64) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_has_equal_timestamps() {
        let draft = NewPost::new("제목".into(), "내용".into());
        assert_eq!(draft.created_at, draft.modified_at);

        let post = draft.into_post(7);
        assert_eq!(post.id, 7);
        assert_eq!(post.title, "제목");
    }

    #[test]
    fn modify_keeps_created_at_and_moves_modified_at_forward() {
        let mut post = NewPost::new("old".into(), "old body".into()).into_post(1);
        let created = post.created_at;

        post.modify("new".into(), "new body".into());

        assert_eq!(post.title, "new");
        assert_eq!(post.content, "new body");
        assert_eq!(post.created_at, created);
        assert!(post.modified_at >= post.created_at);
    }
}
