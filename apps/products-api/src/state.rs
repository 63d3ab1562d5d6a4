//! Application state management

use mongodb::{Client, Database};

/// Shared application state
///
/// Built once in `main` from the configured client; handlers receive the
/// pieces they need through their own routers.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
