use super::ADMIN_PRODUCTS_PATH;
use crate::db;
use crate::helpers::{JsonResponse, Redirect};
use crate::middleware::AdminUser;
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "Admin get the list of products.", skip(pg_pool))]
#[get("")]
pub async fn list_handler(_admin: AdminUser, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::product::fetch_all(pg_pool.get_ref())
        .await
        .map(|products| JsonResponse::build().set_list(products).ok("OK"))
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Admin get product.", skip(pg_pool))]
#[get("/{id}")]
pub async fn item_handler(
    _admin: AdminUser,
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let id = Uuid::parse_str(&path.into_inner().0)
        .map_err(|_| Redirect::to(ADMIN_PRODUCTS_PATH))?;
    let product = db::product::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| Redirect::to(ADMIN_PRODUCTS_PATH))?;

    Ok(JsonResponse::build()
        .set_id(product.id)
        .set_item(product)
        .ok("OK"))
}
