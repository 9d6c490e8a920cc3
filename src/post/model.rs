use chrono::{DateTime, Datelike, Utc};
use mongodb::bson::DateTime as BsonDateTime;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub author: String,
    pub publish: BsonDateTime,
    pub created: BsonDateTime,
    pub updated: BsonDateTime,
    pub status: PostStatus,
    #[serde(default)]
    pub tags: Vec<ObjectId>,
}

impl Post {
    pub fn published_at(&self) -> DateTime<Utc> {
        to_chrono(self.publish)
    }

    /// Canonical detail path, e.g. `/2023/01/15/my-post/`.
    pub fn absolute_url(&self) -> String {
        let publish = self.published_at();
        format!(
            "/{}/{:02}/{:02}/{}/",
            publish.year(),
            publish.month(),
            publish.day(),
            self.slug
        )
    }
}

pub fn to_chrono(value: BsonDateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Tag {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TagView {
    pub name: String,
    pub slug: String,
}

impl From<&Tag> for TagView {
    fn from(tag: &Tag) -> Self {
        TagView {
            name: tag.name.clone(),
            slug: tag.slug.clone(),
        }
    }
}

/// A post as rendered into a page.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub author: String,
    pub publish: DateTime<Utc>,
    pub status: PostStatus,
    pub url: String,
    pub tags: Vec<TagView>,
}

impl PostView {
    /// Tags missing from `tags` are skipped.
    pub fn new(post: &Post, tags: &HashMap<ObjectId, Tag>) -> Self {
        PostView {
            id: post.id.to_hex(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            body: post.body.clone(),
            author: post.author.clone(),
            publish: post.published_at(),
            status: post.status,
            url: post.absolute_url(),
            tags: post
                .tags
                .iter()
                .filter_map(|id| tags.get(id))
                .map(TagView::from)
                .collect(),
        }
    }
}
