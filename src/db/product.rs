use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch product by id.");
    sqlx::query_as::<_, models::Product>(r#"SELECT * FROM product WHERE id = $1 LIMIT 1"#)
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch product, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_featured(pool: &PgPool) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch featured products.");
    sqlx::query_as::<_, models::Product>(
        r#"
        SELECT
            *
        FROM product
        WHERE featured = TRUE
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch featured products, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Case-insensitive match on name or company, newest first.
/// An empty search returns every product.
pub async fn search(pool: &PgPool, search: &str) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Search products.", search);
    sqlx::query_as::<_, models::Product>(
        r#"
        SELECT
            *
        FROM product
        WHERE name ILIKE $1 ESCAPE '\' OR company ILIKE $1 ESCAPE '\'
        ORDER BY created_at DESC
        "#,
    )
    .bind(like_pattern(search))
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to search products, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch all products.");
    sqlx::query_as::<_, models::Product>(r#"SELECT * FROM product ORDER BY created_at DESC"#)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch products, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn insert(pool: &PgPool, product: models::Product) -> Result<models::Product, String> {
    let query_span = tracing::info_span!("Saving new product into the database");
    sqlx::query_as::<_, models::Product>(
        r#"
        INSERT INTO product (
            name,
            company,
            description,
            featured,
            image,
            price,
            user_id,
            created_at,
            updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW() at time zone 'utc', NOW() at time zone 'utc')
        RETURNING *
        "#,
    )
    .bind(&product.name)
    .bind(&product.company)
    .bind(&product.description)
    .bind(product.featured)
    .bind(&product.image)
    .bind(product.price)
    .bind(&product.user_id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

/// Writes the editable fields. `Ok(None)` when the product is gone.
pub async fn update(
    pool: &PgPool,
    product: models::Product,
) -> Result<Option<models::Product>, String> {
    let query_span = tracing::info_span!("Updating product", id = %product.id);
    sqlx::query_as::<_, models::Product>(
        r#"
        UPDATE product
        SET
            name=$2,
            company=$3,
            description=$4,
            featured=$5,
            price=$6,
            updated_at=NOW() at time zone 'utc'
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.company)
    .bind(&product.description)
    .bind(product.featured)
    .bind(product.price)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update product".to_string()
    })
}

pub async fn update_image(
    pool: &PgPool,
    id: Uuid,
    image: &str,
) -> Result<Option<models::Product>, String> {
    let query_span = tracing::info_span!("Updating product image", %id);
    sqlx::query_as::<_, models::Product>(
        r#"
        UPDATE product
        SET
            image=$2,
            updated_at=NOW() at time zone 'utc'
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(image)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update product image".to_string()
    })
}

/// Deletes the row and hands back what was deleted, so its image can go too.
#[tracing::instrument(name = "Delete product.", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<models::Product>, String> {
    sqlx::query_as::<_, models::Product>(r#"DELETE FROM product WHERE id = $1 RETURNING *"#)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to delete product: {:?}", err);
            "Failed to delete product".to_string()
        })
}

/// `%term%` with LIKE wildcards in the term escaped.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn empty_search_matches_everything() {
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("   "), "%%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_pattern("chair"), "%chair%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
