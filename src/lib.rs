pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod repositories;
pub(crate) mod schemas;
pub(crate) mod services;

#[cfg(test)]
mod test_support;

use crate::core::{config::Settings, state::AppState, telemetry};

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let db_pool = db::init_pool(&settings).await?;
    db::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations applied");

    let state = AppState::new(settings, db_pool);
    let app = api::router::router(state.clone());
    let bind = state.settings().bind().clone();
    let listener = tokio::net::TcpListener::bind(bind.to_string()).await?;

    tracing::info!(
        address = %bind,
        environment = state.settings().runtime().environment.as_str(),
        "Quizgrade API listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(core::shutdown::shutdown_signal()).await?;

    state.db().close().await;
    tracing::info!("Database pool closed");

    Ok(())
}
