use super::{product_path, REVIEWS_PATH};
use crate::db;
use crate::helpers::{JsonResponse, PageCache};
use crate::middleware::AuthUser;
use crate::models;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "User delete review.", skip(pg_pool, cache))]
#[delete("/{id}")]
pub async fn delete_handler(
    user: AuthUser,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
    cache: web::Data<PageCache>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let review = db::review::delete(pg_pool.get_ref(), id, &user.id)
        .await
        .map_err(|err| JsonResponse::<models::Review>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Review>::build().not_found("Review not found"))?;

    cache.revalidate(REVIEWS_PATH).await;
    cache.revalidate(&product_path(&review.product_id)).await;

    Ok(JsonResponse::<models::Review>::build()
        .set_id(review.id)
        .ok("Review deleted successfully"))
}
