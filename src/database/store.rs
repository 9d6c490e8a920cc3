use async_trait::async_trait;
use chrono::NaiveDate;
use mongodb::bson::DateTime as BsonDateTime;
use mongodb::bson::oid::ObjectId;

use crate::comment::model::Comment;
use crate::post::model::{Post, Tag};
use crate::utils::error::CustomError;

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Every query the blog handlers run against persistence.
///
/// Methods named `*_published*` only ever see posts whose status is
/// published; `search_posts` is the one query that looks at every post.
#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn find_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, CustomError>;

    async fn find_tags(&self, ids: &[ObjectId]) -> Result<Vec<Tag>, CustomError>;

    /// Published posts, optionally restricted to those carrying `tag`.
    async fn count_published(&self, tag: Option<&ObjectId>) -> Result<u64, CustomError>;

    /// One window of published posts, newest first.
    async fn list_published(
        &self,
        tag: Option<&ObjectId>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, CustomError>;

    /// Published posts with `slug` published on `date` (UTC). Returns at most
    /// two so callers can tell a unique match from an ambiguous one.
    async fn find_published_on(
        &self,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Vec<Post>, CustomError>;

    async fn find_published_by_id(&self, id: &ObjectId) -> Result<Option<Post>, CustomError>;

    /// Active comments on a post, oldest first.
    async fn active_comments(&self, post_id: &ObjectId) -> Result<Vec<Comment>, CustomError>;

    async fn insert_comment(&self, comment: &Comment) -> Result<(), CustomError>;

    /// Other published posts sharing at least one tag with `post`, ranked by
    /// shared tag count then publish date, both descending.
    async fn similar_posts(&self, post: &Post, limit: u64) -> Result<Vec<Post>, CustomError>;

    /// Full-text match on title and body, any status, newest first.
    async fn search_posts(&self, query: &str) -> Result<Vec<Post>, CustomError>;
}

/// Half-open `[start, end)` bounds of a UTC calendar day.
pub fn day_bounds(date: NaiveDate) -> (BsonDateTime, BsonDateTime) {
    let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc().timestamp_millis();
    (
        BsonDateTime::from_millis(start),
        BsonDateTime::from_millis(start + DAY_MILLIS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds_cover_one_utc_day() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        let (start, end) = day_bounds(date);
        let midnight = chrono::DateTime::parse_from_rfc3339("2023-01-15T00:00:00Z").unwrap();
        assert_eq!(start.timestamp_millis(), midnight.timestamp_millis());
        assert_eq!(end.timestamp_millis() - start.timestamp_millis(), DAY_MILLIS);
    }
}
