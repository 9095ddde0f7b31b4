#![allow(dead_code)]

use base64::{engine::general_purpose, Engine as _};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use std::time::Duration;
use storefront::configuration::{get_configuration, DatabaseSettings, Settings};
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ADMIN_ID: &str = "user_admin";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const SHOPPER_ID: &str = "user_shopper";
pub const SHOPPER_TOKEN: &str = "shopper-token";

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub client: reqwest::Client,
    pub auth_server: MockServer,
    pub storage_server: MockServer,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn storage_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/main-bucket/{}",
            self.storage_server.uri(),
            name
        )
    }

    pub async fn storage_requests(&self, http_method: &str) -> usize {
        self.storage_server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.method.to_string() == http_method)
            .count()
    }
}

/// Starts the server against a pool that never connects.
/// Good for everything that must be decided before the database is touched.
pub async fn spawn_app() -> TestApp {
    let (configuration, auth_server, storage_server) = configuration().await;

    let db_pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy(&configuration.database.connection_string())
        .expect("Failed to create lazy pool");

    start(configuration, db_pool, auth_server, storage_server).await
}

/// Starts the server on a fresh, migrated database.
/// `None` when PostgreSQL is unreachable, the caller skips the test.
pub async fn spawn_app_with_db() -> Option<TestApp> {
    let (mut configuration, auth_server, storage_server) = configuration().await;
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let db_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping test: failed to connect to postgres: {}", err);
            return None;
        }
    };

    Some(start(configuration, db_pool, auth_server, storage_server).await)
}

async fn configuration() -> (Settings, MockServer, MockServer) {
    let mut configuration = get_configuration().expect("Failed to get configuration");

    let auth_server = MockServer::start().await;
    mock_identity(&auth_server, ADMIN_TOKEN, ADMIN_ID).await;
    mock_identity(&auth_server, SHOPPER_TOKEN, SHOPPER_ID).await;

    let storage_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/main-bucket/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"Key": "ok"})))
        .mount(&storage_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/main-bucket"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&storage_server)
        .await;

    configuration.auth_url = format!("{}/me", auth_server.uri());
    configuration.admin_user_id = ADMIN_ID.to_string();
    configuration.storage.base_url = storage_server.uri();
    configuration.storage.bucket = "main-bucket".to_string();

    (configuration, auth_server, storage_server)
}

async fn mock_identity(server: &MockServer, token: &str, user_id: &str) {
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": {
                "_id": user_id,
                "first_name": "Test",
                "last_name": "User",
                "email": format!("{}@example.com", user_id),
            }
        })))
        .mount(server)
        .await;
}

async fn start(
    configuration: Settings,
    db_pool: PgPool,
    auth_server: MockServer,
    storage_server: MockServer,
) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = storefront::startup::run(listener, db_pool.clone(), configuration)
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    // redirects are part of what is asserted
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client");

    TestApp {
        address,
        db_pool,
        client,
        auth_server,
        storage_server,
    }
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}

pub fn image_json(name: &str, content_type: &str, bytes: &[u8]) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "content_type": content_type,
        "data": general_purpose::STANDARD.encode(bytes),
    })
}

pub fn product_json(name: &str, featured: bool) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "company": "Modenza",
        "price": 24999,
        "description": "A deep seated armchair in soft velvet with solid oak legs and a curved back.",
        "featured": featured,
        "image": image_json("chair.png", "image/png", b"\x89PNG-bytes"),
    })
}

pub async fn insert_product(pool: &PgPool, name: &str) -> storefront::models::Product {
    let product = storefront::models::Product {
        name: name.to_string(),
        company: "Modenza".to_string(),
        description: "one two three four five six seven eight nine ten".to_string(),
        price: 1000,
        image: "https://cdn.example.com/1700-chair.png".to_string(),
        user_id: ADMIN_ID.to_string(),
        ..Default::default()
    };
    storefront::db::product::insert(pool, product)
        .await
        .expect("Failed to insert product")
}
