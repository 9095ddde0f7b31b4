use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub company: String,
    pub description: String,
    pub featured: bool,
    pub image: String,   // public URL in the storage bucket
    pub price: i32,      // smallest currency unit
    pub user_id: String, // identity that created the product
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
