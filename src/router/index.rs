use crate::post::index::post_routes;
use crate::search::index::search_routes;
use crate::utils::error::CustomError;
use actix_web::web;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| CustomError::BadRequestError(err.to_string()).into()),
    );
    cfg.configure(search_routes);
    cfg.configure(post_routes);
}
