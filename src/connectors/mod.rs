//! External Service Connectors
//!
//! Adapters for the services the storefront leans on. Routes receive a
//! `web::Data<Arc<dyn StorageConnector>>` and never touch the HTTP details.
//!
//! The identity provider is reached from the authentication middleware
//! (`middleware::authentication`), not from here.

pub mod errors;
pub mod storage;

pub use errors::ConnectorError;
pub use storage::{StorageClient, StorageConnector};

use crate::configuration::StorageSettings;
use actix_web::web;
use std::sync::Arc;

pub fn init_storage(
    settings: &StorageSettings,
) -> Result<web::Data<Arc<dyn StorageConnector>>, ConnectorError> {
    let client = StorageClient::new(settings)?;
    tracing::info!(bucket = %settings.bucket, "Storage connector initialized");

    let connector: Arc<dyn StorageConnector> = Arc::new(client);
    Ok(web::Data::new(connector))
}
