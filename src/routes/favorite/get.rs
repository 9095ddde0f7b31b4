use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::AuthUser;
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "Get user favorites.", skip(pg_pool))]
#[get("")]
pub async fn list_handler(user: AuthUser, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::favorite::fetch_by_user(pg_pool.get_ref(), &user.id)
        .await
        .map(|favorites| JsonResponse::build().set_list(favorites).ok("OK"))
        .map_err(|err| {
            JsonResponse::<models::FavoriteWithProduct>::build().internal_server_error(err)
        })
}

/// The caller's favorite id for a product; no `id` in the answer means none.
#[tracing::instrument(name = "Get favorite id.", skip(pg_pool))]
#[get("/{product_id}")]
pub async fn item_handler(
    user: AuthUser,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (product_id,) = path.into_inner();
    let favorite_id = db::favorite::fetch_id(pg_pool.get_ref(), product_id, &user.id)
        .await
        .map_err(|err| JsonResponse::<models::Favorite>::build().internal_server_error(err))?;

    let response = JsonResponse::<models::Favorite>::build();
    Ok(match favorite_id {
        Some(id) => response.set_id(id).ok("OK"),
        None => response.ok("OK"),
    })
}
