use crate::db;
use crate::forms;
use crate::helpers::{JsonResponse, PageCache};
use crate::middleware::AuthUser;
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Toggle favorite.", skip(pg_pool, cache))]
#[post("/toggle")]
pub async fn toggle_handler(
    user: AuthUser,
    form: web::Json<forms::ToggleFavorite>,
    pg_pool: web::Data<PgPool>,
    cache: web::Data<PageCache>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Favorite>::build().form_error(errors.to_string()));
    }

    let forms::ToggleFavorite {
        product_id,
        favorite_id,
        pathname,
    } = form.into_inner();

    let response = match favorite_id {
        Some(favorite_id) => {
            let deleted = db::favorite::delete(pg_pool.get_ref(), favorite_id, &user.id)
                .await
                .map_err(|err| {
                    JsonResponse::<models::Favorite>::build().internal_server_error(err)
                })?;
            if !deleted {
                return Err(JsonResponse::<models::Favorite>::build().not_found("Favorite not found"));
            }
            JsonResponse::<models::Favorite>::build().ok("Removed from Faves")
        }
        None => {
            let favorite = db::favorite::insert(pg_pool.get_ref(), product_id, &user.id)
                .await
                .map_err(|err| {
                    JsonResponse::<models::Favorite>::build().internal_server_error(err)
                })?;
            JsonResponse::build()
                .set_id(favorite.id)
                .set_item(favorite)
                .ok("Added to Faves")
        }
    };

    cache.revalidate(&pathname).await;
    Ok(response)
}
