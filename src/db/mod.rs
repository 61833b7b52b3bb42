pub(crate) mod models;
pub(crate) mod types;

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

use crate::core::config::Settings;

const APPLICATION_NAME: &str = "quizgrade-rust";

pub(crate) async fn init_pool(settings: &Settings) -> Result<PgPool, sqlx::Error> {
    let database = settings.database();
    let options = database
        .connection_url()
        .parse::<PgConnectOptions>()?
        .application_name(APPLICATION_NAME)
        .log_statements(tracing::log::LevelFilter::Debug);

    PgPoolOptions::new()
        .max_connections(database.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(database.acquire_timeout_secs))
        .connect_with(options)
        .await
}

/// Applies the embedded `migrations/` directory.
pub(crate) async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
