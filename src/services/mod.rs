use actix_web::web;

mod page;

pub use page::{PageService, PageServiceTrait};

use crate::handlers::PageServiceType;

/// Service Register
///
/// The service is built once by the caller and shared, so every worker sees
/// the same page table.
pub fn register(page_service: web::Data<PageServiceType>, cfg: &mut web::ServiceConfig) {
    cfg.app_data(page_service);
}
