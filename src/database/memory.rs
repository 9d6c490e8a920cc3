use async_trait::async_trait;
use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::comment::model::Comment;
use crate::database::store::{BlogStore, day_bounds};
use crate::post::model::{Post, PostStatus, Tag};
use crate::utils::error::CustomError;

/// `BlogStore` over plain vectors. Search matches whole words,
/// case-insensitively, and a post matches when any query word appears in its
/// title or body.
#[derive(Default)]
pub struct MemoryStore {
    posts: Mutex<Vec<Post>>,
    tags: Mutex<Vec<Tag>>,
    comments: Mutex<Vec<Comment>>,
}

fn words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn newest_first(posts: &mut [Post]) {
    posts.sort_by_key(|p| Reverse(p.publish.timestamp_millis()));
}

impl MemoryStore {
    pub fn add_tag(&self, name: &str) -> ObjectId {
        let tag = Tag {
            id: ObjectId::new(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
        };
        let id = tag.id;
        self.tags.lock().unwrap().push(tag);
        id
    }

    pub fn add_post(&self, post: Post) -> ObjectId {
        let id = post.id;
        self.posts.lock().unwrap().push(post);
        id
    }

    pub fn add_comment(&self, comment: Comment) {
        self.comments.lock().unwrap().push(comment);
    }

    /// Every stored comment on `post_id`, active or not.
    pub fn comments_on(&self, post_id: &ObjectId) -> Vec<Comment> {
        self.comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == *post_id)
            .cloned()
            .collect()
    }

    fn published_where(&self, predicate: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.status == PostStatus::Published && predicate(p))
            .cloned()
            .collect();
        newest_first(&mut posts);
        posts
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn find_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, CustomError> {
        Ok(self.tags.lock().unwrap().iter().find(|t| t.slug == slug).cloned())
    }

    async fn find_tags(&self, ids: &[ObjectId]) -> Result<Vec<Tag>, CustomError> {
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn count_published(&self, tag: Option<&ObjectId>) -> Result<u64, CustomError> {
        let posts = self.published_where(|p| tag.is_none_or(|id| p.tags.contains(id)));
        Ok(posts.len() as u64)
    }

    async fn list_published(
        &self,
        tag: Option<&ObjectId>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, CustomError> {
        let posts = self.published_where(|p| tag.is_none_or(|id| p.tags.contains(id)));
        Ok(posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_published_on(
        &self,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Vec<Post>, CustomError> {
        let (start, end) = day_bounds(date);
        let (start, end) = (start.timestamp_millis(), end.timestamp_millis());
        let mut posts = self.published_where(|p| {
            let publish = p.publish.timestamp_millis();
            p.slug == slug && publish >= start && publish < end
        });
        posts.truncate(2);
        Ok(posts)
    }

    async fn find_published_by_id(&self, id: &ObjectId) -> Result<Option<Post>, CustomError> {
        Ok(self.published_where(|p| p.id == *id).into_iter().next())
    }

    async fn active_comments(&self, post_id: &ObjectId) -> Result<Vec<Comment>, CustomError> {
        let mut comments: Vec<Comment> = self
            .comments_on(post_id)
            .into_iter()
            .filter(|c| c.active)
            .collect();
        comments.sort_by_key(|c| c.created.timestamp_millis());
        Ok(comments)
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<(), CustomError> {
        self.add_comment(comment.clone());
        Ok(())
    }

    async fn similar_posts(&self, post: &Post, limit: u64) -> Result<Vec<Post>, CustomError> {
        let shared = |p: &Post| p.tags.iter().filter(|t| post.tags.contains(t)).count();

        let mut posts = self.published_where(|p| p.id != post.id && shared(p) > 0);
        // Stable sort keeps the newest-first order among equal counts.
        posts.sort_by_key(|p| Reverse(shared(p)));
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<Post>, CustomError> {
        let terms = words(query);
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                let haystack = words(&format!("{} {}", p.title, p.body));
                terms.iter().any(|t| haystack.contains(t))
            })
            .cloned()
            .collect();
        newest_first(&mut posts);
        Ok(posts)
    }
}
