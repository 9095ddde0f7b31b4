use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

/// `Ok(None)` when the user already reviewed the product.
pub async fn insert(
    pool: &PgPool,
    review: models::Review,
) -> Result<Option<models::Review>, String> {
    let query_span = tracing::info_span!("Saving new review into the database");
    sqlx::query_as::<_, models::Review>(
        r#"
        INSERT INTO review (product_id, user_id, rating, comment, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW() at time zone 'utc', NOW() at time zone 'utc')
        ON CONFLICT (product_id, user_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(review.product_id)
    .bind(&review.user_id)
    .bind(review.rating)
    .bind(&review.comment)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn fetch_by_product(
    pool: &PgPool,
    product_id: Uuid,
) -> Result<Vec<models::Review>, String> {
    let query_span = tracing::info_span!("Fetch reviews of a product.");
    sqlx::query_as::<_, models::Review>(
        r#"
        SELECT
            *
        FROM review
        WHERE product_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch reviews, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<models::UserReview>, String> {
    let query_span = tracing::info_span!("Fetch reviews by user id.");
    sqlx::query_as::<_, models::UserReview>(
        r#"
        SELECT
            r.id,
            r.product_id,
            r.rating,
            r.comment,
            r.created_at,
            p.name AS product_name,
            p.image AS product_image
        FROM review r
        JOIN product p ON p.id = r.product_id
        WHERE r.user_id = $1
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch user reviews, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_product_and_user(
    pool: &PgPool,
    product_id: Uuid,
    user_id: &str,
) -> Result<Option<models::Review>, String> {
    let query_span = tracing::info_span!("Search for existing review.");
    sqlx::query_as::<_, models::Review>(
        r#"SELECT * FROM review WHERE product_id = $1 AND user_id = $2 LIMIT 1"#,
    )
    .bind(product_id)
    .bind(user_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch review, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Only the author's review is removed. Returns the deleted review.
#[tracing::instrument(name = "Delete review.", skip(pool))]
pub async fn delete(
    pool: &PgPool,
    id: Uuid,
    user_id: &str,
) -> Result<Option<models::Review>, String> {
    sqlx::query_as::<_, models::Review>(
        "DELETE FROM review WHERE id = $1 AND user_id = $2 RETURNING *;",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to delete review: {:?}", err);
        "Failed to delete review".to_string()
    })
}

pub async fn rating_summary(
    pool: &PgPool,
    product_id: Uuid,
) -> Result<models::RatingSummary, String> {
    let query_span = tracing::info_span!("Aggregate product rating.");
    sqlx::query_as::<_, (Option<f64>, i64)>(
        r#"
        SELECT
            AVG(rating)::float8,
            COUNT(rating)
        FROM review
        WHERE product_id = $1
        "#,
    )
    .bind(product_id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|(average, count)| models::RatingSummary::from_aggregate(average, count))
    .map_err(|err| {
        tracing::error!("Failed to aggregate rating, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
