use actix_web::HttpResponse;
use actix_web::http::header::CONTENT_TYPE;

pub mod error_handler;
pub mod not_found;

/// Responses built by handlers already carry the JSON envelope; only bare
/// framework responses get rewritten.
fn is_json<B>(res: &HttpResponse<B>) -> bool {
    res.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}
