use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub notifications: NotificationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub name: String,
    /// Reported to the server in the handshake; shows up in `currentOp` and logs.
    pub app_name: String,
    pub max_pool_size: Option<u32>,
    pub min_pool_size: Option<u32>,
    pub server_selection_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_token_ttl_secs: u64,
    pub issuer: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationSettings {
    /// Page size used by `GET /api/notification` when the client omits `limit`.
    pub default_page_size: u64,
    pub default_offset: u64,
    /// Upper bound on detached notify tasks running at once.
    pub max_concurrent_deliveries: usize,
    /// Accept the client-declared `?user_id=` on the push endpoint when no
    /// token is supplied. Development only.
    pub allow_query_user_id: bool,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("TASKHUB"),
            )
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 3000)?
            .set_default("app.cors_origins", Vec::<String>::new())?
            .set_default("database.url", "mongodb://localhost:27017")?
            .set_default("database.name", "taskhub")?
            .set_default("database.app_name", "taskhub-notifications")?
            .set_default("jwt.secret", "change-me-in-production")?
            .set_default("jwt.access_token_ttl_secs", 3600)?
            .set_default("jwt.issuer", "taskhub")?
            .set_default("notifications.default_page_size", 20)?
            .set_default("notifications.default_offset", 0)?
            .set_default("notifications.max_concurrent_deliveries", 256)?
            .set_default("notifications.allow_query_user_id", false)?
            .build()?;

        config.try_deserialize()
    }
}
