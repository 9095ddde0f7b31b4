use crate::models;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn fetch_id(
    pool: &PgPool,
    product_id: Uuid,
    user_id: &str,
) -> Result<Option<Uuid>, String> {
    let query_span = tracing::info_span!("Search for the user's favorite.");
    sqlx::query_scalar::<_, Uuid>(
        r#"SELECT id FROM favorite WHERE product_id = $1 AND user_id = $2 LIMIT 1"#,
    )
    .bind(product_id)
    .bind(user_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch favorite, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Adding an existing favorite again returns the existing row.
pub async fn insert(
    pool: &PgPool,
    product_id: Uuid,
    user_id: &str,
) -> Result<models::Favorite, String> {
    let query_span = tracing::info_span!("Saving new favorite into the database");
    sqlx::query_as::<_, models::Favorite>(
        r#"
        INSERT INTO favorite (product_id, user_id, created_at, updated_at)
        VALUES ($1, $2, NOW() at time zone 'utc', NOW() at time zone 'utc')
        ON CONFLICT (product_id, user_id)
        DO UPDATE SET updated_at = NOW() at time zone 'utc'
        RETURNING *
        "#,
    )
    .bind(product_id)
    .bind(user_id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

/// Only the owner's favorite is removed. `false` when nothing matched.
#[tracing::instrument(name = "Delete favorite.", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid, user_id: &str) -> Result<bool, String> {
    sqlx::query::<sqlx::Postgres>("DELETE FROM favorite WHERE id = $1 AND user_id = $2;")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete favorite: {:?}", err);
            "Failed to delete favorite".to_string()
        })
}

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    id: Uuid,
    product_id: Uuid,
    user_id: String,
    created_at: DateTime<Utc>,
    product_name: String,
    product_company: String,
    product_description: String,
    product_featured: bool,
    product_image: String,
    product_price: i32,
    product_user_id: String,
    product_created_at: DateTime<Utc>,
    product_updated_at: DateTime<Utc>,
}

impl From<FavoriteRow> for models::FavoriteWithProduct {
    fn from(row: FavoriteRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            user_id: row.user_id,
            created_at: row.created_at,
            product: models::Product {
                id: row.product_id,
                name: row.product_name,
                company: row.product_company,
                description: row.product_description,
                featured: row.product_featured,
                image: row.product_image,
                price: row.product_price,
                user_id: row.product_user_id,
                created_at: row.product_created_at,
                updated_at: row.product_updated_at,
            },
        }
    }
}

pub async fn fetch_by_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<models::FavoriteWithProduct>, String> {
    let query_span = tracing::info_span!("Fetch favorites by user id.");
    sqlx::query_as::<_, FavoriteRow>(
        r#"
        SELECT
            f.id,
            f.product_id,
            f.user_id,
            f.created_at,
            p.name AS product_name,
            p.company AS product_company,
            p.description AS product_description,
            p.featured AS product_featured,
            p.image AS product_image,
            p.price AS product_price,
            p.user_id AS product_user_id,
            p.created_at AS product_created_at,
            p.updated_at AS product_updated_at
        FROM favorite f
        JOIN product p ON p.id = f.product_id
        WHERE f.user_id = $1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map(|rows| rows.into_iter().map(Into::into).collect())
    .map_err(|err| {
        tracing::error!("Failed to fetch favorites, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
