use std::env;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;

use config::{Config, Environment, File};

use secrecy::Secret;

use serde::Deserialize;
use serde_aux::prelude::*;

use sqlx::postgres::PgConnectOptions;

use url::Url;

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Application settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub database: DatabaseSettings,
    pub cors: CorsSettings,
}

impl Settings {
    /// Load application settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        // Get the path to the settings directory
        let path = env::current_dir()?.join("settings");
        // Get the current environment based on the `APP_ENV` environment variable, default to `Dev`
        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }
    /// Load application settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        let settings: Self = Config::builder()
            // Include the base settings
            .add_source(File::from(base_path.join("base")).required(true))
            // Include the runtime settings
            .add_source(File::from(base_path.join(runtime.as_str())).required(true))
            // Override/include any settings from environment variables
            // NOTE: The database URL and name are only ever supplied this way, e.g. `APP_DATABASE__URL`
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.database.backend == StoreBackend::Postgres {
            self.database.connect_options()?;
        }
        self.cors.allowed_origins()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    list_limit: usize,
    greeting: String,
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
    /// Maximum number of records returned by a list endpoint
    pub fn list_limit(&self) -> usize {
        self.list_limit
    }
    /// The message returned from the API root
    pub fn greeting(&self) -> &str {
        &self.greeting
    }
}

/// Document store implementation to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    backend: StoreBackend,
    url: Option<Secret<String>>,
    name: Option<String>,
}

impl DatabaseSettings {
    pub fn backend(&self) -> StoreBackend {
        self.backend
    }
    /// The database connection options, from the connection string and database name
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        use secrecy::ExposeSecret;

        let url = self
            .url
            .as_ref()
            .context("Missing database connection string (APP_DATABASE__URL)")?;
        let name = self
            .name
            .as_deref()
            .context("Missing database name (APP_DATABASE__NAME)")?;

        let options = PgConnectOptions::from_str(url.expose_secret())
            .context("Failed to parse database connection string")?;

        Ok(options.database(name))
    }
}

/// Origins permitted to make cross-origin requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Deserialize)]
pub struct CorsSettings {
    /// Comma separated origins, `*` for any
    allowed_origins: String,
}

impl CorsSettings {
    pub fn allowed_origins(&self) -> anyhow::Result<AllowedOrigins> {
        let origins: Vec<&str> = self
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() || origins.contains(&"*") {
            return Ok(AllowedOrigins::Any);
        }

        origins
            .into_iter()
            .map(|origin| {
                let url = Url::parse(origin)
                    .with_context(|| format!("{} is not a valid CORS origin", origin))?;
                Ok(url.origin().ascii_serialization())
            })
            .collect::<anyhow::Result<_>>()
            .map(AllowedOrigins::List)
    }
}
