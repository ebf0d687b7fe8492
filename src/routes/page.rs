use actix_web::web;

use super::not_found;
use crate::{
    handlers::{create_handler, delete_handler, get_handler, update_handler},
    models::PageId,
};

const API_PREFIX: &str = "/api";
const PAGE_COLLECTION: &str = "/page";

/// Path a page can be fetched from
pub fn page_path(id: &PageId) -> String {
    format!("{}{}/{}", API_PREFIX, PAGE_COLLECTION, id)
}

// Collection route takes POST only, item route GET/PUT/DELETE; anything
// else under the prefix, including deeper paths, is a 404
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            .service(
                web::resource(PAGE_COLLECTION)
                    .route(web::post().to(create_handler))
                    .default_service(web::to(not_found)),
            )
            .service(
                web::resource(format!("{}/{{id}}", PAGE_COLLECTION))
                    .route(web::get().to(get_handler))
                    .route(web::put().to(update_handler))
                    .route(web::delete().to(delete_handler))
                    .default_service(web::to(not_found)),
            )
            .default_service(web::to(not_found)),
    );
}
