use crate::configuration::Settings;
use crate::connectors;
use crate::helpers::{JsonResponse, PageCache};
use crate::middleware;
use crate::middleware::authentication::AuthCache;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let storage = connectors::init_storage(&settings.storage)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

    let auth_http_client = reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    let auth_http_client = web::Data::new(auth_http_client);

    let auth_cache = web::Data::new(AuthCache::new(Duration::from_secs(60)));
    let page_cache = web::Data::new(PageCache::new(Duration::from_secs(
        settings.cache.ttl_secs,
    )));

    let json_config = web::JsonConfig::default()
        .limit(settings.max_body_size)
        .error_handler(|err, _req| {
            let msg: String = match err {
                error::JsonPayloadError::Deserialize(err) => format!(
                    "Invalid form data at line {}, column {}: {}",
                    err.line(),
                    err.column(),
                    err
                ),
                err => format!("Invalid form data: {}", err),
            };
            JsonResponse::<()>::build().form_error(msg)
        });

    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::authentication::Manager::new())
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/products")
                    .service(routes::product::featured_handler)
                    .service(routes::product::list_handler)
                    .service(routes::product::item_handler)
                    .service(routes::product::reviews_handler)
                    .service(routes::product::rating_handler),
            )
            .service(
                web::scope("/admin").service(
                    web::scope("/products")
                        .service(routes::admin::product::list_handler)
                        .service(routes::admin::product::add_handler)
                        .service(routes::admin::product::item_handler)
                        .service(routes::admin::product::update_handler)
                        .service(routes::admin::product::update_image_handler)
                        .service(routes::admin::product::delete_handler),
                ),
            )
            .service(
                web::scope("/favorites")
                    .service(routes::favorite::list_handler)
                    .service(routes::favorite::toggle_handler)
                    .service(routes::favorite::item_handler),
            )
            .service(
                web::scope("/reviews")
                    .service(routes::review::list_handler)
                    .service(routes::review::add_handler)
                    .service(routes::review::existing_handler)
                    .service(routes::review::delete_handler),
            )
            .app_data(json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(storage.clone())
            .app_data(auth_http_client.clone())
            .app_data(auth_cache.clone())
            .app_data(page_cache.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
