use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::Settings;

/// Shared handle passed to every handler. Cloning is cheap: settings sit behind an
/// `Arc` and `PgPool` is itself reference counted.
#[derive(Clone)]
pub(crate) struct AppState {
    settings: Arc<Settings>,
    db: PgPool,
}

impl AppState {
    pub(crate) fn new(settings: Settings, db: PgPool) -> Self {
        Self { settings: Arc::new(settings), db }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) fn db(&self) -> &PgPool {
        &self.db
    }
}
