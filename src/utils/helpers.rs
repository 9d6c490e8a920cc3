use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use serde_json::json;

use crate::config::service_name;

/// Render a page context inside the service's response envelope.
pub fn render_page<T: Serialize>(status: StatusCode, message: &str, context: T) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "success": status.is_success(),
        "message": message,
        "httpStatusCode": status.as_u16(),
        "service": service_name(),
        "data": context,
    }))
}
