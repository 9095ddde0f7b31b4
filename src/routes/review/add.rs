use super::{product_path, REVIEWS_PATH};
use crate::db;
use crate::forms;
use crate::helpers::{JsonResponse, PageCache};
use crate::middleware::AuthUser;
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Add review.", skip(pg_pool, cache))]
#[post("")]
pub async fn add_handler(
    user: AuthUser,
    form: web::Json<forms::ReviewForm>,
    pg_pool: web::Data<PgPool>,
    cache: web::Data<PageCache>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Review>::build().form_error(errors.to_string()));
    }

    let existing =
        db::review::fetch_by_product_and_user(pg_pool.get_ref(), form.product_id, &user.id)
            .await
            .map_err(|err| JsonResponse::<models::Review>::build().internal_server_error(err))?;
    if let Some(review) = existing {
        tracing::info!(
            "review exists: {}, user: {}, product: {}",
            review.id,
            user.id,
            review.product_id
        );
        return Err(JsonResponse::<models::Review>::build()
            .conflict("You have already reviewed this product"));
    }

    let review = form.into_inner().into_review(user.id.clone());
    // a concurrent submit can get past the lookup above, the constraint catches it
    let review = db::review::insert(pg_pool.get_ref(), review)
        .await
        .map_err(|err| JsonResponse::<models::Review>::build().internal_server_error(err))?
        .ok_or_else(|| {
            JsonResponse::<models::Review>::build()
                .conflict("You have already reviewed this product")
        })?;
    tracing::info!("New review {} has been saved to database", review.id);

    cache.revalidate(&product_path(&review.product_id)).await;
    cache.revalidate(REVIEWS_PATH).await;

    Ok(JsonResponse::build()
        .set_id(review.id)
        .set_item(review)
        .ok("Review submitted successfully"))
}
