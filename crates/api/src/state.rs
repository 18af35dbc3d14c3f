use std::sync::Arc;

use atelier_db::ProjectStore;
use atelier_gateway::ModelGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; the store and gateway sit behind `Arc` so background
/// completion tasks can hold them past the request lifetime. Both are
/// trait objects: tests inject doubles, and the store backend (in-memory
/// or SQLite) is chosen at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProjectStore>,
    pub gateway: Arc<dyn ModelGateway>,
    pub config: Arc<ServerConfig>,
}
