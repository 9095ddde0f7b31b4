use super::ADMIN_PRODUCTS_PATH;
use crate::configuration::Settings;
use crate::connectors::StorageConnector;
use crate::db;
use crate::forms;
use crate::helpers::{see_other, JsonResponse, PageCache};
use crate::middleware::AdminUser;
use crate::models;
use crate::routes::product::PRODUCTS_PATH;
use actix_web::{post, web, HttpResponse, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Add product.", skip(form, pg_pool, storage, settings, cache))]
#[post("")]
pub async fn add_handler(
    admin: AdminUser,
    form: web::Json<forms::NewProductForm>,
    pg_pool: web::Data<PgPool>,
    storage: web::Data<Arc<dyn StorageConnector>>,
    settings: web::Data<Settings>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    let forms::NewProductForm { product, image } = form.into_inner();

    if let Err(errors) = product.check() {
        tracing::debug!("Invalid product form: {}", errors);
        return Err(JsonResponse::<models::Product>::build().form_error(errors));
    }
    let image = image
        .check(settings.storage.max_image_size)
        .map_err(|err| JsonResponse::<models::Product>::build().form_error(err))?;

    let image_url = storage.upload(&image).await.map_err(|err| {
        tracing::error!("Failed to upload product image: {}", err);
        JsonResponse::<models::Product>::build().internal_server_error(err.to_string())
    })?;

    let product = product.into_product(admin.id.clone(), image_url);
    let product = db::product::insert(pg_pool.get_ref(), product)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?;
    tracing::info!("New product {} has been saved to database", product.id);

    cache.revalidate(ADMIN_PRODUCTS_PATH).await;
    cache.revalidate(PRODUCTS_PATH).await;

    Ok(see_other(ADMIN_PRODUCTS_PATH))
}
