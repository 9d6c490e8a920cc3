use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, Result, dev::ServiceResponse};
use serde_json::json;

use super::is_json;
use crate::config::service_name;

/// Wrap any other bare error response (405, extractor failures, ...) in the
/// JSON envelope.
pub fn handle_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    if is_json(res.response()) {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let status_code = res.status();
    let error_message = res
        .response()
        .error()
        .map(|e| e.to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status_code
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    let new_response = HttpResponse::build(status_code).json(json!({
        "success": false,
        "message": error_message,
        "httpStatusCode": status_code.as_u16(),
        "error": status_code.canonical_reason().unwrap_or("Unknown"),
        "service": service_name(),
    }));

    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, new_response.map_into_right_body());

    Ok(ErrorHandlerResponse::Response(res))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::not_found::not_found;
    use crate::utils::error::CustomError;
    use actix_web::http::StatusCode;
    use actix_web::middleware::ErrorHandlers;
    use actix_web::{App, test, web};

    async fn missing_post() -> std::result::Result<HttpResponse, CustomError> {
        Err(CustomError::NotFoundError("Post not found".into()))
    }

    #[actix_web::test]
    async fn handler_errors_pass_through() {
        let app = test::init_service(
            App::new()
                .route("/post/", web::get().to(missing_post))
                .wrap(
                    ErrorHandlers::new()
                        .handler(StatusCode::NOT_FOUND, not_found)
                        .default_handler(handle_error),
                ),
        )
        .await;

        let req = test::TestRequest::get().uri("/post/").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Not Found: Post not found");
    }

    #[actix_web::test]
    async fn unknown_route_and_wrong_method_get_envelopes() {
        let app = test::init_service(
            App::new()
                .service(web::resource("/post/").route(web::get().to(missing_post)))
                .wrap(
                    ErrorHandlers::new()
                        .handler(StatusCode::NOT_FOUND, not_found)
                        .default_handler(handle_error),
                ),
        )
        .await;

        let req = test::TestRequest::get().uri("/nowhere/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Route does not exist");

        let req = test::TestRequest::delete().uri("/post/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["httpStatusCode"], 405);
        assert_eq!(body["success"], false);
    }
}
