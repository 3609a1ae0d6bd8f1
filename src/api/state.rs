//! Shared state for API handlers.

use derive_getters::Getters;
use derive_new::new;

use crate::service::GameService;

/// State injected into every handler.
#[derive(Debug, Clone, Getters, new)]
pub struct AppState {
    service: GameService,
}
