use crate::db;
use crate::helpers::{JsonResponse, PageCache, Redirect};
use crate::models;
use actix_web::{get, web, HttpRequest, HttpResponse, Result};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Missing products send the visitor back to the catalogue.
pub const PRODUCTS_PATH: &str = "/products";

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

fn cache_key(req: &HttpRequest) -> String {
    PageCache::key(req.path(), req.query_string())
}

async fn respond_cached(cache: &PageCache, key: String, body: serde_json::Value) -> HttpResponse {
    cache.insert(key, body.clone()).await;
    HttpResponse::Ok().json(body)
}

#[tracing::instrument(name = "Get featured products.", skip(req, pg_pool, cache))]
#[get("/featured")]
pub async fn featured_handler(
    req: HttpRequest,
    pg_pool: web::Data<PgPool>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    let key = cache_key(&req);
    if let Some(body) = cache.get(&key).await {
        return Ok(HttpResponse::Ok().json(body));
    }

    let body = db::product::fetch_featured(pg_pool.get_ref())
        .await
        .map(|products| JsonResponse::build().set_list(products).to_value("OK"))
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?;

    Ok(respond_cached(&cache, key, body).await)
}

#[tracing::instrument(name = "Search products.", skip(req, pg_pool, cache))]
#[get("")]
pub async fn list_handler(
    req: HttpRequest,
    query: web::Query<SearchQuery>,
    pg_pool: web::Data<PgPool>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    let key = cache_key(&req);
    if let Some(body) = cache.get(&key).await {
        return Ok(HttpResponse::Ok().json(body));
    }

    let body = db::product::search(pg_pool.get_ref(), &query.search)
        .await
        .map(|products| JsonResponse::build().set_list(products).to_value("OK"))
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?;

    Ok(respond_cached(&cache, key, body).await)
}

#[tracing::instrument(name = "Get product.", skip(req, pg_pool, cache))]
#[get("/{id}")]
pub async fn item_handler(
    req: HttpRequest,
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    let key = cache_key(&req);
    if let Some(body) = cache.get(&key).await {
        return Ok(HttpResponse::Ok().json(body));
    }

    // an id that can't exist is just another missing product
    let id = Uuid::parse_str(&path.into_inner().0).map_err(|_| Redirect::to(PRODUCTS_PATH))?;
    let product = db::product::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| Redirect::to(PRODUCTS_PATH))?;

    let body = JsonResponse::build()
        .set_id(product.id)
        .set_item(product)
        .to_value("OK");
    Ok(respond_cached(&cache, key, body).await)
}

#[tracing::instrument(name = "Get product reviews.", skip(req, pg_pool, cache))]
#[get("/{id}/reviews")]
pub async fn reviews_handler(
    req: HttpRequest,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    let key = cache_key(&req);
    if let Some(body) = cache.get(&key).await {
        return Ok(HttpResponse::Ok().json(body));
    }

    let (id,) = path.into_inner();
    let body = db::review::fetch_by_product(pg_pool.get_ref(), id)
        .await
        .map(|reviews| JsonResponse::build().set_list(reviews).to_value("OK"))
        .map_err(|err| JsonResponse::<models::Review>::build().internal_server_error(err))?;

    Ok(respond_cached(&cache, key, body).await)
}

#[tracing::instrument(name = "Get product rating.", skip(req, pg_pool, cache))]
#[get("/{id}/rating")]
pub async fn rating_handler(
    req: HttpRequest,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    let key = cache_key(&req);
    if let Some(body) = cache.get(&key).await {
        return Ok(HttpResponse::Ok().json(body));
    }

    let (id,) = path.into_inner();
    let body = db::review::rating_summary(pg_pool.get_ref(), id)
        .await
        .map(|summary| JsonResponse::build().set_item(summary).to_value("OK"))
        .map_err(|err| {
            JsonResponse::<models::RatingSummary>::build().internal_server_error(err)
        })?;

    Ok(respond_cached(&cache, key, body).await)
}
