use chrono::{DateTime, Utc};
use mongodb::bson::DateTime as BsonDateTime;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::forms::CommentData;
use crate::post::model::to_chrono;

fn default_active() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub post_id: ObjectId,
    pub name: String,
    pub email: String,
    pub body: String,
    pub created: BsonDateTime,
    pub updated: BsonDateTime,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Comment {
    /// A new active comment on `post_id`.
    pub fn new(post_id: ObjectId, data: CommentData) -> Self {
        let now = BsonDateTime::now();
        Comment {
            id: ObjectId::new(),
            post_id,
            name: data.name,
            email: data.email,
            body: data.body,
            created: now,
            updated: now,
            active: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: String,
    pub name: String,
    pub body: String,
    pub created: DateTime<Utc>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        CommentView {
            id: comment.id.to_hex(),
            name: comment.name.clone(),
            body: comment.body.clone(),
            created: to_chrono(comment.created),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document};

    #[test]
    fn new_comments_are_active() {
        let post_id = ObjectId::new();
        let comment = Comment::new(
            post_id,
            CommentData {
                name: "Ann".into(),
                email: "ann@example.com".into(),
                body: "Hello".into(),
            },
        );
        assert!(comment.active);
        assert_eq!(comment.post_id, post_id);
        assert_eq!(comment.created, comment.updated);
    }

    #[test]
    fn missing_active_flag_defaults_to_true() {
        let comment: Comment = from_document(doc! {
            "_id": ObjectId::new(),
            "post_id": ObjectId::new(),
            "name": "Ann",
            "email": "ann@example.com",
            "body": "Hello",
            "created": BsonDateTime::now(),
            "updated": BsonDateTime::now(),
        })
        .unwrap();
        assert!(comment.active);
    }
}
