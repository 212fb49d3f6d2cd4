use std::sync::Arc;

use tuicher_types::{Action, SearchResult};

use crate::error::{BackendError, HostError};
use crate::layout::LayoutProbe;

/// Query side of the launcher backend
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    /// Ranked results for the given query text
    async fn search(&self, text: &str) -> Result<Vec<SearchResult>, BackendError>;
}

/// Performs a chosen result's action out of process
#[async_trait::async_trait]
pub trait ActionExecutor: Send + Sync {
    async fn execute_action(&self, action: Action) -> Result<(), BackendError>;
}

/// Window the launcher lives in
pub trait WindowHost: Send + Sync {
    fn close_window(&self) -> Result<(), HostError>;
}

/// Collaborators the controller talks to
#[derive(Clone)]
pub struct ControllerContext {
    pub search: Arc<dyn SearchBackend>,
    pub executor: Arc<dyn ActionExecutor>,
    pub window: Arc<dyn WindowHost>,
    pub layout: Arc<dyn LayoutProbe>,
}

impl ControllerContext {
    pub fn new(
        search: Arc<dyn SearchBackend>,
        executor: Arc<dyn ActionExecutor>,
        window: Arc<dyn WindowHost>,
        layout: Arc<dyn LayoutProbe>,
    ) -> Self {
        Self {
            search,
            executor,
            window,
            layout,
        }
    }
}
