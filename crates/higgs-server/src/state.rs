//! Shared application state.

use higgs_core::{GenerateDefaults, ServeEngine, SessionStore};
use std::sync::Arc;
use tokio::sync::RwLock;

/// State handed to every handler.
///
/// The engine is optional: a server started without one still answers
/// health and library routes, and reports `model_loaded: false`.
#[derive(Clone)]
pub struct AppState {
    pub engine: Option<Arc<dyn ServeEngine>>,
    pub store: Arc<RwLock<SessionStore>>,
    pub defaults: GenerateDefaults,
}

impl AppState {
    pub fn new(engine: Option<Arc<dyn ServeEngine>>, defaults: GenerateDefaults) -> Self {
        Self {
            engine,
            store: Arc::new(RwLock::new(SessionStore::new())),
            defaults,
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.engine.is_some()
    }
}
