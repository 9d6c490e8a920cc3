use super::controller::{
    add_comment, post_detail, post_list, post_list_by_tag, post_share, send_share,
};
use actix_web::web;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(post_list)))
        .service(web::resource("/tag/{tag_slug}/").route(web::get().to(post_list_by_tag)))
        .service(
            web::resource("/{post_id}/share/")
                .route(web::get().to(post_share))
                .route(web::post().to(send_share)),
        )
        .service(
            web::resource("/{year}/{month}/{day}/{slug}/")
                .route(web::get().to(post_detail))
                .route(web::post().to(add_comment)),
        );
}
