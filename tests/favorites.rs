mod common;

use common::{insert_product, spawn_app, spawn_app_with_db, SHOPPER_TOKEN};
use reqwest::StatusCode;

async fn toggle(app: &common::TestApp, body: serde_json::Value) -> reqwest::Response {
    app.client
        .post(app.url("/favorites/toggle"))
        .bearer_auth(SHOPPER_TOKEN)
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.")
}

#[tokio::test]
async fn toggle_requires_an_absolute_pathname() {
    let app = spawn_app().await;

    let response = toggle(
        &app,
        serde_json::json!({
            "product_id": uuid::Uuid::new_v4(),
            "pathname": "products",
        }),
    )
    .await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
}

#[tokio::test]
async fn favorite_can_be_added_and_removed() {
    let Some(app) = spawn_app_with_db().await else {
        return;
    };
    let product = insert_product(&app.db_pool, "Floor Lamp").await;

    let response = toggle(
        &app,
        serde_json::json!({
            "product_id": product.id,
            "pathname": "/products",
        }),
    )
    .await;
    assert_eq!(StatusCode::OK, response.status());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!("Added to Faves", body["message"]);
    let favorite_id = body["id"].as_str().expect("favorite id").to_string();

    let lookup: serde_json::Value = app
        .client
        .get(app.url(&format!("/favorites/{}", product.id)))
        .bearer_auth(SHOPPER_TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(favorite_id, lookup["id"]);

    let list: serde_json::Value = app
        .client
        .get(app.url("/favorites"))
        .bearer_auth(SHOPPER_TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let list = list["list"].as_array().expect("favorites");
    assert_eq!(1, list.len());
    assert_eq!("Floor Lamp", list[0]["product"]["name"]);

    let response = toggle(
        &app,
        serde_json::json!({
            "product_id": product.id,
            "favorite_id": favorite_id,
            "pathname": "/favorites",
        }),
    )
    .await;
    assert_eq!(StatusCode::OK, response.status());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!("Removed from Faves", body["message"]);

    let lookup: serde_json::Value = app
        .client
        .get(app.url(&format!("/favorites/{}", product.id)))
        .bearer_auth(SHOPPER_TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(lookup.get("id").is_none());
}

#[tokio::test]
async fn adding_twice_keeps_one_favorite() {
    let Some(app) = spawn_app_with_db().await else {
        return;
    };
    let product = insert_product(&app.db_pool, "Rug").await;
    let form = serde_json::json!({ "product_id": product.id, "pathname": "/" });

    let first: serde_json::Value = toggle(&app, form.clone()).await.json().await.unwrap();
    let second: serde_json::Value = toggle(&app, form).await.json().await.unwrap();

    assert_eq!(first["id"], second["id"]);
}

#[tokio::test]
async fn someone_elses_favorite_is_not_removed() {
    let Some(app) = spawn_app_with_db().await else {
        return;
    };
    let product = insert_product(&app.db_pool, "Mirror").await;
    let favorite = storefront::db::favorite::insert(&app.db_pool, product.id, common::ADMIN_ID)
        .await
        .unwrap();

    let response = toggle(
        &app,
        serde_json::json!({
            "product_id": product.id,
            "favorite_id": favorite.id,
            "pathname": "/products",
        }),
    )
    .await;

    assert_eq!(StatusCode::NOT_FOUND, response.status());
    let still_there = storefront::db::favorite::fetch_id(&app.db_pool, product.id, common::ADMIN_ID)
        .await
        .unwrap();
    assert_eq!(Some(favorite.id), still_there);
}
