use std::time::Duration;

use mongodb::{Client, Database, options::ClientOptions};
use taskhub_config::{DatabaseSettings, Settings};
use tracing::info;

pub async fn connect(settings: &Settings) -> Result<Database, mongodb::error::Error> {
    let options = client_options(&settings.database).await?;
    let client = Client::with_options(options)?;

    // Verify connection
    client
        .database("admin")
        .run_command(bson::doc! { "ping": 1 })
        .await?;

    info!(
        db = %settings.database.name,
        app_name = %settings.database.app_name,
        "Connected to MongoDB"
    );

    Ok(client.database(&settings.database.name))
}

/// Driver options for the notification store: the connection string plus
/// pool bounds, server-selection timeout and the app name reported to the
/// server.
pub async fn client_options(
    database: &DatabaseSettings,
) -> Result<ClientOptions, mongodb::error::Error> {
    let mut options = ClientOptions::parse(&database.url).await?;

    options.app_name = Some(database.app_name.clone());
    if database.max_pool_size.is_some() {
        options.max_pool_size = database.max_pool_size;
    }
    if database.min_pool_size.is_some() {
        options.min_pool_size = database.min_pool_size;
    }
    if let Some(secs) = database.server_selection_timeout_secs {
        options.server_selection_timeout = Some(Duration::from_secs(secs));
    }

    Ok(options)
}
