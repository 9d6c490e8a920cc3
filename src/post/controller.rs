use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::NaiveDate;
use log::{info, warn};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::comment::model::{Comment, CommentView};
use crate::database::BlogStore;
use crate::forms::{BoundForm, CommentForm, FieldErrors, ShareForm, validate_comment, validate_share};
use crate::post::model::{Post, PostView, TagView};
use crate::utils::email::Mailer;
use crate::utils::error::CustomError;
use crate::utils::helpers::render_page;
use crate::utils::pagination::{POSTS_PER_PAGE, Page, PageWindow};

const SIMILAR_POSTS: u64 = 4;

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

#[derive(Deserialize)]
pub struct PostDatePath {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub slug: String,
}

#[derive(Serialize)]
struct ListPage {
    page: Option<String>,
    posts: Page<PostView>,
    tag: Option<TagView>,
}

#[derive(Serialize)]
struct DetailPage {
    post: PostView,
    comments: Vec<CommentView>,
    new_comment: Option<CommentView>,
    comment_form: BoundForm<CommentForm>,
    similar_posts: Vec<PostView>,
}

#[derive(Serialize)]
struct SharePage {
    post: PostView,
    form: BoundForm<ShareForm>,
    sent: bool,
}

/// Render posts with their tag names resolved in one lookup.
pub async fn post_views(
    store: &dyn BlogStore,
    posts: &[Post],
) -> Result<Vec<PostView>, CustomError> {
    let ids: HashSet<ObjectId> = posts.iter().flat_map(|p| p.tags.iter().copied()).collect();

    let tags = if ids.is_empty() {
        HashMap::new()
    } else {
        let ids: Vec<ObjectId> = ids.into_iter().collect();
        store
            .find_tags(&ids)
            .await?
            .into_iter()
            .map(|tag| (tag.id, tag))
            .collect()
    };

    Ok(posts.iter().map(|post| PostView::new(post, &tags)).collect())
}

/// GET /
pub async fn post_list(
    store: web::Data<dyn BlogStore>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, CustomError> {
    list_posts(store.get_ref(), None, query.into_inner().page).await
}

/// GET /tag/{tag_slug}/
pub async fn post_list_by_tag(
    store: web::Data<dyn BlogStore>,
    tag_slug: web::Path<String>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, CustomError> {
    list_posts(store.get_ref(), Some(tag_slug.as_str()), query.into_inner().page).await
}

async fn list_posts(
    store: &dyn BlogStore,
    tag_slug: Option<&str>,
    page: Option<String>,
) -> Result<HttpResponse, CustomError> {
    let tag = match tag_slug {
        Some(slug) => Some(
            store
                .find_tag_by_slug(slug)
                .await?
                .ok_or_else(|| CustomError::NotFoundError("Tag not found".into()))?,
        ),
        None => None,
    };
    let tag_id = tag.as_ref().map(|t| &t.id);

    let count = store.count_published(tag_id).await?;
    let window = PageWindow::resolve(page.as_deref(), count, POSTS_PER_PAGE);
    let posts = store
        .list_published(tag_id, window.offset(), window.per_page)
        .await?;
    let posts = post_views(store, &posts).await?;

    Ok(render_page(
        StatusCode::OK,
        "Posts fetched successfully",
        ListPage {
            page,
            posts: window.into_page(posts),
            tag: tag.as_ref().map(TagView::from),
        },
    ))
}

async fn find_dated_post(store: &dyn BlogStore, path: &PostDatePath) -> Result<Post, CustomError> {
    let not_found = || CustomError::NotFoundError("Post not found".into());

    let date = NaiveDate::from_ymd_opt(path.year, path.month, path.day).ok_or_else(not_found)?;
    let mut posts = store.find_published_on(date, &path.slug).await?;

    // Two posts with one slug on one day is as unresolvable as none.
    if posts.len() != 1 {
        return Err(not_found());
    }
    posts.pop().ok_or_else(not_found)
}

async fn render_detail(
    store: &dyn BlogStore,
    post: &Post,
    comment_form: BoundForm<CommentForm>,
    new_comment: Option<&Comment>,
    status: StatusCode,
    message: &str,
) -> Result<HttpResponse, CustomError> {
    let comments = store.active_comments(&post.id).await?;
    let similar = store.similar_posts(post, SIMILAR_POSTS).await?;

    let mut views = post_views(store, std::slice::from_ref(post)).await?;
    let post_view = views
        .pop()
        .ok_or_else(|| CustomError::InternalServerError("Failed to render post".into()))?;

    Ok(render_page(
        status,
        message,
        DetailPage {
            post: post_view,
            comments: comments.iter().map(CommentView::from).collect(),
            new_comment: new_comment.map(CommentView::from),
            comment_form,
            similar_posts: post_views(store, &similar).await?,
        },
    ))
}

/// GET /{year}/{month}/{day}/{slug}/
pub async fn post_detail(
    store: web::Data<dyn BlogStore>,
    path: web::Path<PostDatePath>,
) -> Result<HttpResponse, CustomError> {
    let store = store.get_ref();
    let post = find_dated_post(store, &path).await?;

    render_detail(
        store,
        &post,
        BoundForm::unbound(),
        None,
        StatusCode::OK,
        "Post fetched successfully",
    )
    .await
}

/// POST /{year}/{month}/{day}/{slug}/
pub async fn add_comment(
    store: web::Data<dyn BlogStore>,
    path: web::Path<PostDatePath>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, CustomError> {
    let store = store.get_ref();
    let post = find_dated_post(store, &path).await?;
    let form = form.into_inner();

    match validate_comment(&form) {
        Ok(data) => {
            let comment = Comment::new(post.id, data);
            store.insert_comment(&comment).await?;
            info!("Comment {} added to post {}", comment.id, post.id);

            render_detail(
                store,
                &post,
                BoundForm::bound(form, FieldErrors::new()),
                Some(&comment),
                StatusCode::CREATED,
                "Comment added successfully",
            )
            .await
        }
        Err(errors) => {
            warn!("Rejected comment on post {}: {:?}", post.id, errors);

            render_detail(
                store,
                &post,
                BoundForm::bound(form, errors),
                None,
                StatusCode::BAD_REQUEST,
                "Comment form is invalid",
            )
            .await
        }
    }
}

async fn find_shared_post(store: &dyn BlogStore, post_id: &str) -> Result<Post, CustomError> {
    let not_found = || CustomError::NotFoundError("Post not found".into());

    let id = ObjectId::parse_str(post_id).map_err(|_| not_found())?;
    store.find_published_by_id(&id).await?.ok_or_else(not_found)
}

async fn render_share(
    store: &dyn BlogStore,
    post: &Post,
    form: BoundForm<ShareForm>,
    sent: bool,
    status: StatusCode,
    message: &str,
) -> Result<HttpResponse, CustomError> {
    let post_view = post_views(store, std::slice::from_ref(post))
        .await?
        .pop()
        .ok_or_else(|| CustomError::InternalServerError("Failed to render post".into()))?;

    Ok(render_page(
        status,
        message,
        SharePage {
            post: post_view,
            form,
            sent,
        },
    ))
}

/// GET /{post_id}/share/
pub async fn post_share(
    store: web::Data<dyn BlogStore>,
    post_id: web::Path<String>,
) -> Result<HttpResponse, CustomError> {
    let store = store.get_ref();
    let post = find_shared_post(store, &post_id).await?;

    render_share(
        store,
        &post,
        BoundForm::unbound(),
        false,
        StatusCode::OK,
        "Post fetched successfully",
    )
    .await
}

/// POST /{post_id}/share/
pub async fn send_share(
    req: HttpRequest,
    store: web::Data<dyn BlogStore>,
    mailer: web::Data<dyn Mailer>,
    post_id: web::Path<String>,
    form: web::Form<ShareForm>,
) -> Result<HttpResponse, CustomError> {
    let store = store.get_ref();
    let post = find_shared_post(store, &post_id).await?;
    let form = form.into_inner();

    let data = match validate_share(&form) {
        Ok(data) => data,
        Err(errors) => {
            warn!("Rejected share of post {}: {:?}", post.id, errors);
            return render_share(
                store,
                &post,
                BoundForm::bound(form, errors),
                false,
                StatusCode::BAD_REQUEST,
                "Share form is invalid",
            )
            .await;
        }
    };

    let post_url = {
        let conn = req.connection_info();
        format!("{}://{}{}", conn.scheme(), conn.host(), post.absolute_url())
    };
    let subject = format!(
        "{} ({}) recommends you read \"{}\"",
        data.name, data.email, post.title
    );
    let body = format!(
        "Read \"{}\" at {}\n\n{}'s comments: {}",
        post.title, post_url, data.name, data.comments
    );

    mailer.send_mail(&data.to, &subject, &body).await?;
    info!("Post {} shared with {}", post.id, data.to);

    render_share(
        store,
        &post,
        BoundForm::bound(form, FieldErrors::new()),
        true,
        StatusCode::OK,
        "Post shared successfully",
    )
    .await
}
