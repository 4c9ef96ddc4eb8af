use std::sync::Arc;

use tavola_notify::Notifier;

use crate::config::ServerConfig;
use crate::engine::ReservationEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tavola_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Outbound email seam; injected so handlers and the engine never
    /// reach for a global mail client.
    pub notifier: Arc<dyn Notifier>,
    /// Reservation availability & lifecycle engine.
    pub engine: Arc<ReservationEngine>,
}

impl AppState {
    /// Assemble application state from its explicit dependencies.
    pub fn new(
        pool: tavola_db::DbPool,
        config: Arc<ServerConfig>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let engine = Arc::new(ReservationEngine::new(pool.clone(), Arc::clone(&notifier)));
        Self {
            pool,
            config,
            notifier,
            engine,
        }
    }
}
