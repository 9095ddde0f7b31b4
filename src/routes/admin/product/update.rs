use super::edit_path;
use crate::configuration::Settings;
use crate::connectors::StorageConnector;
use crate::db;
use crate::forms;
use crate::helpers::{JsonResponse, PageCache};
use crate::middleware::AdminUser;
use crate::models;
use crate::routes::product::PRODUCTS_PATH;
use actix_web::{put, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(name = "Update product.", skip(form, pg_pool, cache))]
#[put("/{id}")]
pub async fn update_handler(
    _admin: AdminUser,
    path: web::Path<(Uuid,)>,
    form: web::Json<forms::ProductForm>,
    pg_pool: web::Data<PgPool>,
    cache: web::Data<PageCache>,
) -> Result<impl Responder> {
    if let Err(errors) = form.check() {
        tracing::debug!("Invalid product form: {}", errors);
        return Err(JsonResponse::<models::Product>::build().form_error(errors));
    }

    let (id,) = path.into_inner();
    let mut product = db::product::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Product>::build().not_found("Product not found"))?;

    form.into_inner().update(&mut product);
    let product = db::product::update(pg_pool.get_ref(), product)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Product>::build().not_found("Product not found"))?;

    cache.revalidate(&edit_path(&product.id)).await;
    cache.revalidate(PRODUCTS_PATH).await;

    Ok(JsonResponse::build()
        .set_id(product.id)
        .set_item(product)
        .ok("Product updated successfully"))
}

/// Uploads the new image first, then drops the old object, then points the row at the new one.
#[tracing::instrument(name = "Update product image.", skip(form, pg_pool, storage, settings, cache))]
#[put("/{id}/image")]
pub async fn update_image_handler(
    _admin: AdminUser,
    path: web::Path<(Uuid,)>,
    form: web::Json<forms::UpdateImageForm>,
    pg_pool: web::Data<PgPool>,
    storage: web::Data<Arc<dyn StorageConnector>>,
    settings: web::Data<Settings>,
    cache: web::Data<PageCache>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let forms::UpdateImageForm { image, url } = form.into_inner();

    let image = image
        .check(settings.storage.max_image_size)
        .map_err(|err| JsonResponse::<models::Product>::build().form_error(err))?;

    let image_url = storage.upload(&image).await.map_err(|err| {
        tracing::error!("Failed to upload product image: {}", err);
        JsonResponse::<models::Product>::build().internal_server_error(err.to_string())
    })?;

    storage.delete(&url).await.map_err(|err| {
        tracing::error!("Failed to delete old product image {}: {}", url, err);
        JsonResponse::<models::Product>::build().internal_server_error(err.to_string())
    })?;

    let product = db::product::update_image(pg_pool.get_ref(), id, &image_url)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Product>::build().not_found("Product not found"))?;

    cache.revalidate(&edit_path(&product.id)).await;
    cache.revalidate(PRODUCTS_PATH).await;

    Ok(JsonResponse::build()
        .set_id(product.id)
        .set_item(product)
        .ok("Product Image updated successfully"))
}
