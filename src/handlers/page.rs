use actix_web::{
    http::header::{ContentType, LOCATION},
    web, HttpResponse, Responder,
};
use log::{debug, error, info};

use crate::{
    errors::AppError,
    models::{CreatedPageDto, Page, PageId},
    repositories::InMemoryPageRepository,
    routes::page_path,
    services::{PageService, PageServiceTrait},
    types::Result,
};

pub type PageServiceType = PageService<InMemoryPageRepository>;

/// Create page route handler
///
/// Body decoding failures never reach this point; the JSON extractor's
/// error handler turns them into a 400.
pub async fn create_handler(
    page: web::Json<Page>,
    service: web::Data<PageServiceType>,
) -> Result<impl Responder> {
    let id = service.insert(page.into_inner()).await?;
    Ok(HttpResponse::Found()
        .insert_header((LOCATION, page_path(&id)))
        .json(CreatedPageDto::from(&id)))
}

/// Get page by id route handler
pub async fn get_handler(
    path: web::Path<String>,
    service: web::Data<PageServiceType>,
) -> Result<impl Responder> {
    let raw_id = path.into_inner();
    let id = parse_id(&raw_id)?;
    let page = service.lookup(&id).await?;

    let body = serde_json::to_string(&page).map_err(|e| {
        error!("Error while encoding page '{}': {}", id, e);
        e
    })?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// Update page route handler
///
/// Accepted for any id; the store does not change.
pub async fn update_handler(
    path: web::Path<String>,
    body: web::Bytes,
    service: web::Data<PageServiceType>,
) -> Result<impl Responder> {
    let raw_id = path.into_inner();
    if let Ok(id) = raw_id.parse::<PageId>() {
        let page = match serde_json::from_slice::<Page>(&body) {
            Ok(page) => page,
            Err(e) => {
                debug!("Ignoring update body for page '{}': {}", id, e);
                Page::default()
            }
        };
        service.update(&id, page).await?;
    }
    info!("Update requested for page '{}'", raw_id);
    Ok(HttpResponse::Ok().finish())
}

/// Delete page route handler
///
/// Accepted for any id; the store does not change.
pub async fn delete_handler(
    path: web::Path<String>,
    service: web::Data<PageServiceType>,
) -> Result<impl Responder> {
    let raw_id = path.into_inner();
    if let Ok(id) = raw_id.parse::<PageId>() {
        service.remove(&id).await?;
    }
    info!("Delete requested for page '{}'", raw_id);
    Ok(HttpResponse::Ok().finish())
}

// Anything that isn't shaped like an id can't be stored, so it's simply not found
fn parse_id(raw: &str) -> Result<PageId> {
    raw.parse::<PageId>().map_err(|e| {
        debug!("Lookup with malformed id: {}", e);
        AppError::NotFound(format!("Page '{}'", raw))
    })
}
