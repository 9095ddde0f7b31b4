use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::AuthUser;
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "Get user reviews.", skip(pg_pool))]
#[get("")]
pub async fn list_handler(user: AuthUser, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::review::fetch_by_user(pg_pool.get_ref(), &user.id)
        .await
        .map(|reviews| JsonResponse::build().set_list(reviews).ok("OK"))
        .map_err(|err| JsonResponse::<models::UserReview>::build().internal_server_error(err))
}

/// The caller's review of a product, if they wrote one.
#[tracing::instrument(name = "Find existing review.", skip(pg_pool))]
#[get("/existing/{product_id}")]
pub async fn existing_handler(
    user: AuthUser,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (product_id,) = path.into_inner();
    let review = db::review::fetch_by_product_and_user(pg_pool.get_ref(), product_id, &user.id)
        .await
        .map_err(|err| JsonResponse::<models::Review>::build().internal_server_error(err))?;

    let response = JsonResponse::<models::Review>::build();
    Ok(match review {
        Some(review) => response.set_id(review.id).set_item(review).ok("OK"),
        None => response.ok("OK"),
    })
}
