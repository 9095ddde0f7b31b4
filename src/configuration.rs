#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    pub auth_url: String,
    #[serde(default)]
    pub admin_user_id: String,
    #[serde(default = "Settings::default_max_body_size")]
    pub max_body_size: usize,
    pub storage: StorageSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct StorageSettings {
    /// Base URL of the storage API, e.g. https://<project>.supabase.co
    pub base_url: String,
    pub bucket: String,
    #[serde(default)]
    pub service_key: String,
    #[serde(default = "StorageSettings::default_max_image_size")]
    pub max_image_size: usize,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: u64,
}

impl Settings {
    fn default_max_body_size() -> usize {
        2 * 1024 * 1024
    }

    /// The admin console is closed when no admin id is configured.
    pub fn is_admin(&self, user_id: &str) -> bool {
        !self.admin_user_id.is_empty() && self.admin_user_id == user_id
    }
}

impl StorageSettings {
    fn default_max_image_size() -> usize {
        1024 * 1024
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: 300 }
    }
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;

    // Secrets are never kept in configuration.yaml
    if let Ok(admin_user_id) = std::env::var("ADMIN_USER_ID") {
        config.admin_user_id = admin_user_id;
    }
    if let Ok(service_key) = std::env::var("STORAGE_SERVICE_KEY") {
        config.storage.service_key = service_key;
    }

    Ok(config)
}
