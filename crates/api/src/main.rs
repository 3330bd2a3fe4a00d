use std::sync::Arc;

use taskhub_api::{build_router, state::AppState};
use taskhub_config::Settings;
use taskhub_db::{connect, indexes::ensure_indexes};
use taskhub_services::NotificationDao;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "taskhub_api=debug,taskhub_services=debug,taskhub_db=debug,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let settings = Settings::load()?;
    info!("Starting TaskHub API on {}:{}", settings.app.host, settings.app.port);
    if settings.notifications.allow_query_user_id {
        tracing::warn!("Push endpoint accepts unauthenticated ?user_id= handshakes");
    }

    // Connect to MongoDB
    let db = connect(&settings).await?;

    // Ensure indexes
    ensure_indexes(&db).await?;

    let store = Arc::new(NotificationDao::new(&db));
    let app_state = AppState::new(settings.clone(), store);

    // Build router
    let app = build_router(app_state);

    // Start server
    let addr = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
