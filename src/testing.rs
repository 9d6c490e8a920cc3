//! Shared fixtures for handler tests.

use chrono::DateTime;
use mongodb::bson::DateTime as BsonDateTime;
use mongodb::bson::oid::ObjectId;

use crate::comment::model::Comment;
use crate::post::model::{Post, PostStatus};

/// A published, untagged post. `publish` is RFC 3339.
pub fn post(title: &str, publish: &str) -> Post {
    let publish = DateTime::parse_from_rfc3339(publish).expect("fixture date");
    let publish = BsonDateTime::from_millis(publish.timestamp_millis());
    Post {
        id: ObjectId::new(),
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        body: format!("Body of {}", title),
        author: "admin".to_string(),
        publish,
        created: publish,
        updated: publish,
        status: PostStatus::Published,
        tags: Vec::new(),
    }
}

pub fn comment(post_id: ObjectId, name: &str, active: bool) -> Comment {
    let now = BsonDateTime::now();
    Comment {
        id: ObjectId::new(),
        post_id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        body: format!("{} says hi", name),
        created: now,
        updated: now,
        active,
    }
}

/// Build an initialised test service over a `MemoryStore` and a mailer,
/// wired the same way `main` wires the real ones.
macro_rules! test_app {
    ($store:expr, $mailer:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from(
                    $store as std::sync::Arc<dyn crate::database::BlogStore>,
                ))
                .app_data(actix_web::web::Data::from(
                    $mailer as std::sync::Arc<dyn crate::utils::email::Mailer>,
                ))
                .configure(crate::router::index::routes)
                .wrap(
                    actix_web::middleware::ErrorHandlers::new()
                        .handler(
                            actix_web::http::StatusCode::NOT_FOUND,
                            crate::middleware::not_found::not_found,
                        )
                        .default_handler(crate::middleware::error_handler::handle_error),
                ),
        )
        .await
    };
}

pub(crate) use test_app;
