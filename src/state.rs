use crate::{config::Config, db::connection::DbPool};

/// Shared resources handed to every handler: the SQLite pool and the parsed
/// configuration. Constructed once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self { pool, config }
    }
}
