use std::net::TcpListener;

use anyhow::Context;

use photobooth::app::{self, ApiOptions};
use photobooth::settings::Settings;
use photobooth::store::DocumentStore;
use photobooth::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine, the environment may already be set
    dotenvy::dotenv().ok();

    let settings = Settings::load().context("Failed to load settings")?;

    let subscriber = telemetry::create_subscriber("info", std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let options = ApiOptions::from_settings(&settings)?;

    let store = app::connect_store(&settings.database).await?;

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let result = app::run(listener, store.clone(), options)?
        .await
        .context("Failed to run app");

    store.close().await;
    tracing::info!("Document store closed");

    result
}
