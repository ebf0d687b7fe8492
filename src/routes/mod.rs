use actix_web::{web, HttpResponse, Responder};
use log::warn;

use crate::{config::PagesConfig, errors::AppError};

mod page;

pub use page::page_path;

const GREETING: &str = "Hello World\n";

// Handler function for the root route "/"
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(GREETING)
}

// Fallback for every unmatched path and method
async fn not_found() -> impl Responder {
    HttpResponse::NotFound().finish()
}

/// JSON extractor settings for page bodies
///
/// Bodies are accepted whatever their Content-Type; decoding failures are
/// logged and answered with a structured 400.
fn json_config(config: &PagesConfig) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(config.json_limit)
        .content_type_required(false)
        .content_type(|_| true)
        .error_handler(|err, req| {
            warn!(
                "Error while parsing JSON for {} {}: {}",
                req.method(),
                req.path(),
                err
            );
            AppError::Validation(err.to_string()).into()
        })
}

// Configure all routes function
pub fn configure_routes(cfg: &mut web::ServiceConfig, config: &PagesConfig) {
    cfg.app_data(json_config(config));
    // Any method on the exact root gets the greeting
    cfg.service(web::resource("/").to(index));
    page::configure_routes(cfg);
    cfg.default_service(web::to(not_found));
}
