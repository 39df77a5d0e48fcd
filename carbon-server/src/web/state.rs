//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::RouteCatalog;
use crate::config::ModeDisplayTable;
use crate::engine::EmissionEngine;

/// Shared application state.
///
/// Everything here is immutable after startup, so handlers share it
/// without any locking.
#[derive(Clone)]
pub struct AppState {
    /// Known city-pair distances
    pub catalog: Arc<RouteCatalog>,

    /// The calculation engine
    pub engine: Arc<EmissionEngine>,

    /// Mode identifier → label/icon/color for rendering
    pub mode_display: Arc<ModeDisplayTable>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        catalog: RouteCatalog,
        engine: EmissionEngine,
        mode_display: ModeDisplayTable,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            engine: Arc::new(engine),
            mode_display: Arc::new(mode_display),
        }
    }
}
