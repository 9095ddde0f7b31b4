use super::ADMIN_PRODUCTS_PATH;
use crate::connectors::StorageConnector;
use crate::db;
use crate::helpers::{JsonResponse, PageCache};
use crate::middleware::AdminUser;
use crate::models;
use crate::routes::product::PRODUCTS_PATH;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(name = "Delete product.", skip(pg_pool, storage, cache))]
#[delete("/{id}")]
pub async fn delete_handler(
    _admin: AdminUser,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
    storage: web::Data<Arc<dyn StorageConnector>>,
    cache: web::Data<PageCache>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let product = db::product::delete(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Product>::build().not_found("Product not found"))?;

    // the row is gone whatever happens to the image
    cache.revalidate(ADMIN_PRODUCTS_PATH).await;
    cache.revalidate(PRODUCTS_PATH).await;

    storage.delete(&product.image).await.map_err(|err| {
        tracing::error!("Product {} deleted but its image was not: {}", product.id, err);
        JsonResponse::<models::Product>::build().internal_server_error(err.to_string())
    })?;

    Ok(JsonResponse::<models::Product>::build()
        .set_id(product.id)
        .ok("product removed"))
}
