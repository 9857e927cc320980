use std::net::TcpListener;
use std::sync::Arc;

use actix_cors::Cors;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};

use anyhow::Context;

use sqlx::PgPool;

use tracing_actix_web::TracingLogger;

use crate::controller::{self, bookings, contacts, newsletter, Greeting, ListLimit};
use crate::error::{FieldError, RestError};
use crate::settings::{AllowedOrigins, DatabaseSettings, Settings, StoreBackend};
use crate::store::{DocumentStore, MemoryStore, PgStore};

/// Path prefix of every API endpoint
pub const API_PREFIX: &str = "/api";

/// Request-independent options of the HTTP API
#[derive(Debug, Clone)]
pub struct ApiOptions {
    pub list_limit: usize,
    pub greeting: String,
    pub allowed_origins: AllowedOrigins,
}

impl ApiOptions {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self {
            list_limit: settings.app.list_limit(),
            greeting: settings.app.greeting().to_string(),
            allowed_origins: settings.cors.allowed_origins()?,
        })
    }
}

/// Open the configured document store, applying migrations where needed
pub async fn connect_store(database: &DatabaseSettings) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match database.backend() {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory document store, records are lost on shutdown");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = PgPool::connect_with(database.connect_options()?)
                .await
                .context("Failed to connect to the document store")?;
            let store = PgStore::new(pool);
            store
                .migrate()
                .await
                .context("Failed to run database migrations")?;
            Ok(Arc::new(store))
        }
    }
}

/// Build the CORS middleware, credentials and any method/header are always allowed
fn cors(origins: &AllowedOrigins) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials();

    match origins {
        AllowedOrigins::Any => cors.allow_any_origin(),
        AllowedOrigins::List(origins) => origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}

/// Reject undecodable bodies the same way as invalid fields
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected request body");
        RestError::Validation(vec![FieldError::whole_body(err.to_string())]).into()
    })
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    store: Arc<dyn DocumentStore>,
    options: ApiOptions,
) -> anyhow::Result<Server> {
    // Wrap application data
    let store: web::Data<dyn DocumentStore> = web::Data::from(store);
    let greeting = web::Data::new(Greeting::new(options.greeting));
    let list_limit = web::Data::new(ListLimit(options.list_limit));
    let allowed_origins = options.allowed_origins;

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origins))
            .wrap(TracingLogger::default())
            .app_data(store.clone())
            .app_data(greeting.clone())
            .app_data(list_limit.clone())
            .app_data(json_config())
            .service(
                web::scope(API_PREFIX)
                    .route("", web::get().to(controller::root))
                    .route("/", web::get().to(controller::root))
                    .service(bookings::scope())
                    .service(contacts::scope())
                    .service(newsletter::scope()),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
