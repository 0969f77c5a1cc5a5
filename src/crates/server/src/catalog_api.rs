use super::consts;
use super::AppState;
use crate::middleware::profile::{app_context, resolve_profile};
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    middleware::{from_fn, Next},
    web,
    web::Json,
    web::Path,
    web::Query,
    HttpRequest, HttpResponse, Responder,
};
use application::command::entry::{CreateEntryCmd, UpdateEntryCmd};
use application::context::AppContext;
use application::error::AppError;
use domain::value::EntryId;
use log::{error, info};
use model::entry::{EntrySearch, EntryView};
use model::page::Page;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Storage(String),
    #[error("authentication required")]
    Unauthorized,
    #[error("admin role required")]
    Forbidden,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else if err.is_validation() {
            ApiError::Validation(err.to_string())
        } else {
            error!("Catalog operation failed: {}", err);
            ApiError::Storage(err.to_string())
        }
    }
}

impl actix_web::error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "status": self.status_code().as_u16(),
            "error": self.to_string(),
        }))
    }
}

fn require_admin(ctx: &AppContext) -> Result<(), ApiError> {
    match &ctx.actor {
        None => Err(ApiError::Unauthorized),
        Some(_) if !ctx.is_admin() => Err(ApiError::Forbidden),
        Some(_) => Ok(()),
    }
}

/// Guards the admin scope before any body is extracted, so anonymous callers get 401
/// even when the payload is malformed.
async fn admin_only(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    if let Err(e) = require_admin(&app_context(req.request())) {
        return Ok(req
            .into_response(actix_web::error::ResponseError::error_response(&e))
            .map_into_right_body());
    }
    next.call(req).await.map(ServiceResponse::map_into_left_body)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub name: String,
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub category_id: Option<String>,
    pub preview_attach_link: Option<String>,
    pub video_link: Option<String>,
    pub translation_language: Option<String>,
}

impl From<CreateEntryRequest> for CreateEntryCmd {
    fn from(req: CreateEntryRequest) -> Self {
        Self {
            name: req.name,
            country: req.country,
            media_type: req.media_type,
            category_id: req.category_id,
            preview_attach_link: req.preview_attach_link,
            video_link: req.video_link,
            translation_language: req.translation_language,
        }
    }
}

/// Only these fields are mutable after creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    pub name: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub category_id: Option<String>,
}

impl From<UpdateEntryRequest> for UpdateEntryCmd {
    fn from(req: UpdateEntryRequest) -> Self {
        Self {
            name: req.name,
            country: req.country,
            media_type: req.media_type,
            category_id: req.category_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<u64>,
    size: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    name: String,
    page: Option<u64>,
    size: Option<u64>,
}

fn page_params(state: &AppState, page: Option<u64>, size: Option<u64>) -> (u64, u64) {
    (
        page.unwrap_or(0),
        size.unwrap_or(state.app_cfg.catalog().default_page_size),
    )
}

async fn create_entry(
    state: web::Data<AppState>,
    req: HttpRequest,
    Json(body): Json<CreateEntryRequest>,
) -> Result<HttpResponse, ApiError> {
    let ctx = app_context(&req);
    let view = state.catalog.create_entry(&ctx, body.into()).await?;
    Ok(HttpResponse::Created().json(view))
}

async fn update_entry(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: Path<String>,
    Json(body): Json<UpdateEntryRequest>,
) -> Result<Json<EntryView>, ApiError> {
    let ctx = app_context(&req);
    let id = EntryId::from(path.into_inner());
    let view = state.catalog.update_entry(&ctx, &id, body.into()).await?;
    Ok(Json(view))
}

async fn delete_entry(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: Path<String>,
) -> Result<Json<bool>, ApiError> {
    let ctx = app_context(&req);
    let id = EntryId::from(path.into_inner());
    Ok(Json(state.catalog.delete_entry(&ctx, &id).await?))
}

async fn get_entry(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: Path<String>,
) -> Result<Json<EntryView>, ApiError> {
    let ctx = app_context(&req);
    let id = EntryId::from(path.into_inner());
    Ok(Json(state.catalog.get_entry(&ctx, &id).await?))
}

async fn list_entries(
    state: web::Data<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<EntryView>>, ApiError> {
    let (page, size) = page_params(&state, query.page, query.size);
    Ok(Json(state.catalog.list_entries(page, size).await?))
}

async fn list_by_category(
    state: web::Data<AppState>,
    path: Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<EntryView>>, ApiError> {
    let (page, size) = page_params(&state, query.page, query.size);
    let category_id = path.into_inner();
    Ok(Json(
        state
            .catalog
            .list_by_category(&category_id, page, size)
            .await?,
    ))
}

async fn list_by_name(
    state: web::Data<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Page<EntryView>>, ApiError> {
    let (page, size) = page_params(&state, query.page, query.size);
    Ok(Json(
        state.catalog.list_by_name(&query.name, page, size).await?,
    ))
}

async fn filter_entries(
    state: web::Data<AppState>,
    Json(search): Json<EntrySearch>,
) -> Result<Json<Vec<EntryView>>, ApiError> {
    Ok(Json(state.catalog.filter_entries(&search).await?))
}

async fn list_by_view_count(
    state: web::Data<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<EntryView>>, ApiError> {
    let (page, size) = page_params(&state, query.page, query.size);
    Ok(Json(state.catalog.list_by_view_count(page, size).await?))
}

async fn record_view(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: Path<String>,
) -> Result<HttpResponse, ApiError> {
    let ctx = app_context(&req);
    let id = EntryId::from(path.into_inner());
    state.catalog.record_view(&ctx, &id).await?;
    Ok(HttpResponse::Ok().finish())
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_service(svc: &mut web::ServiceConfig) {
    info!("http config for {}", consts::URL_PATH_API);
    svc.service(
        web::scope(consts::URL_PATH_API)
            .wrap(from_fn(resolve_profile))
            .route("/health", web::get().to(health))
            .service(
                web::scope("/admin/entries")
                    .wrap(from_fn(admin_only))
                    .route("", web::post().to(create_entry))
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(update_entry))
                            .route(web::delete().to(delete_entry)),
                    ),
            )
            .service(
                web::scope("/entries")
                    .route("", web::get().to(list_entries))
                    .route("/filter", web::post().to(filter_entries))
                    .route("/by-name", web::get().to(list_by_name))
                    .route("/by-view-count", web::get().to(list_by_view_count))
                    .route("/category/{category_id}", web::get().to(list_by_category))
                    .route("/{id}", web::get().to(get_entry))
                    .route("/{id}/view", web::post().to(record_view)),
            ),
    );
}
