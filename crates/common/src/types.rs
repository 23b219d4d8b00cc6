//! Shared record types

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    /// Epoch seconds.
    pub created_at: i64,
}

/// Payload for creating a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

impl NewPost {
    /// Materialize a `Post` with a fresh id and timestamp.
    pub fn into_post(self) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: self.title,
            body: self.body,
            created_at: Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_materializes_fields() {
        let post = NewPost {
            title: "Hello".to_string(),
            body: "World".to_string(),
        }
        .into_post();

        assert_eq!(post.title, "Hello");
        assert_eq!(post.body, "World");
        assert!(post.created_at > 0);
    }

    #[test]
    fn test_distinct_posts_get_distinct_ids() {
        let a = NewPost {
            title: "a".into(),
            body: "".into(),
        }
        .into_post();
        let b = NewPost {
            title: "b".into(),
            body: "".into(),
        }
        .into_post();
        assert_ne!(a.id, b.id);
    }
}
