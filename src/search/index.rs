use super::controller::post_search;
use actix_web::web;

pub fn search_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/search/").route(web::get().to(post_search)));
}
