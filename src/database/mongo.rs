use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::TryStreamExt;
use log::error;
use mongodb::bson::{Document, doc, from_document, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};

use crate::comment::model::Comment;
use crate::database::store::{BlogStore, day_bounds};
use crate::post::model::{Post, PostStatus, Tag};
use crate::utils::error::CustomError;

/// Restrict `filter` to published posts. Every published-post query goes
/// through here.
pub fn published_filter(mut filter: Document) -> Document {
    filter.insert("status", PostStatus::Published.as_str());
    filter
}

fn tag_filter(tag: Option<&ObjectId>) -> Document {
    match tag {
        Some(id) => published_filter(doc! { "tags": *id }),
        None => published_filter(doc! {}),
    }
}

fn db_error(action: &'static str) -> impl Fn(mongodb::error::Error) -> CustomError {
    move |e| {
        error!("{}: {}", action, e);
        CustomError::InternalServerError(format!("{}: {}", action, e))
    }
}

pub struct MongoStore {
    posts: Collection<Post>,
    tags: Collection<Tag>,
    comments: Collection<Comment>,
}

impl MongoStore {
    pub fn new(client: &Client, database: &str) -> Self {
        let db = client.database(database);
        MongoStore {
            posts: db.collection::<Post>("posts"),
            tags: db.collection::<Tag>("tags"),
            comments: db.collection::<Comment>("comments"),
        }
    }

    /// Create the indexes the queries rely on. Safe to run on every startup.
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        self.posts
            .create_indexes(vec![
                IndexModel::builder()
                    .keys(doc! { "title": "text", "body": "text" })
                    .options(IndexOptions::builder().name("post_search".to_string()).build())
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "status": 1, "publish": -1 })
                    .build(),
            ])
            .await?;

        self.tags
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "slug": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;

        self.comments
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "post_id": 1, "active": 1 })
                    .build(),
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl BlogStore for MongoStore {
    async fn find_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, CustomError> {
        self.tags
            .find_one(doc! { "slug": slug })
            .await
            .map_err(db_error("Failed to fetch tag"))
    }

    async fn find_tags(&self, ids: &[ObjectId]) -> Result<Vec<Tag>, CustomError> {
        let cursor = self
            .tags
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(db_error("Failed to fetch tags"))?;

        cursor
            .try_collect()
            .await
            .map_err(db_error("Failed to collect tags"))
    }

    async fn count_published(&self, tag: Option<&ObjectId>) -> Result<u64, CustomError> {
        self.posts
            .count_documents(tag_filter(tag))
            .await
            .map_err(db_error("Failed to count posts"))
    }

    async fn list_published(
        &self,
        tag: Option<&ObjectId>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, CustomError> {
        let cursor = self
            .posts
            .find(tag_filter(tag))
            .sort(doc! { "publish": -1 })
            .skip(offset)
            .limit(limit as i64)
            .await
            .map_err(db_error("Failed to fetch posts"))?;

        cursor
            .try_collect()
            .await
            .map_err(db_error("Failed to collect posts"))
    }

    async fn find_published_on(
        &self,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Vec<Post>, CustomError> {
        let (start, end) = day_bounds(date);
        let cursor = self
            .posts
            .find(published_filter(doc! {
                "slug": slug,
                "publish": { "$gte": start, "$lt": end },
            }))
            .limit(2)
            .await
            .map_err(db_error("Failed to fetch post"))?;

        cursor
            .try_collect()
            .await
            .map_err(db_error("Failed to collect post"))
    }

    async fn find_published_by_id(&self, id: &ObjectId) -> Result<Option<Post>, CustomError> {
        self.posts
            .find_one(published_filter(doc! { "_id": *id }))
            .await
            .map_err(db_error("Failed to fetch post"))
    }

    async fn active_comments(&self, post_id: &ObjectId) -> Result<Vec<Comment>, CustomError> {
        let cursor = self
            .comments
            .find(doc! { "post_id": *post_id, "active": true })
            .sort(doc! { "created": 1 })
            .await
            .map_err(db_error("Failed to fetch comments"))?;

        cursor
            .try_collect()
            .await
            .map_err(db_error("Failed to collect comments"))
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<(), CustomError> {
        self.comments
            .insert_one(comment)
            .await
            .map_err(db_error("Failed to add comment"))?;
        Ok(())
    }

    async fn similar_posts(&self, post: &Post, limit: u64) -> Result<Vec<Post>, CustomError> {
        if post.tags.is_empty() {
            return Ok(Vec::new());
        }

        let pipeline = vec![
            doc! { "$match": published_filter(doc! {
                "_id": { "$ne": post.id },
                "tags": { "$in": post.tags.clone() },
            }) },
            doc! { "$addFields": {
                "same_tags": { "$size": { "$setIntersection": ["$tags", post.tags.clone()] } },
            } },
            doc! { "$sort": { "same_tags": -1, "publish": -1 } },
            doc! { "$limit": limit as i64 },
        ];

        let documents: Vec<Document> = self
            .posts
            .aggregate(pipeline)
            .await
            .map_err(db_error("Failed to fetch similar posts"))?
            .try_collect()
            .await
            .map_err(db_error("Failed to collect similar posts"))?;

        documents
            .into_iter()
            .map(|document| {
                from_document::<Post>(document).map_err(|e| {
                    error!("Failed to decode similar post: {}", e);
                    CustomError::InternalServerError(format!("Failed to decode post: {}", e))
                })
            })
            .collect()
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<Post>, CustomError> {
        let cursor = self
            .posts
            .find(doc! { "$text": { "$search": query } })
            .sort(doc! { "publish": -1 })
            .await
            .map_err(db_error("Failed to search posts"))?;

        cursor
            .try_collect()
            .await
            .map_err(db_error("Failed to collect search results"))
    }
}
