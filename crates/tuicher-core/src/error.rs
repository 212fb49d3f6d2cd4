#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    #[error("Search failed: {0}")]
    Search(String),

    #[error("Action failed: {0}")]
    Action(String),

    #[error("Unsupported action: {0}")]
    Unsupported(String),

    #[error("Backend channel closed")]
    ChannelClosed,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum HostError {
    #[error("Failed to close window: {0}")]
    CloseWindow(String),
}

/// Failures reported to the view layer on the error stream
#[derive(Debug, Clone, thiserror::Error)]
pub enum ControllerError {
    #[error("Controller event queue closed")]
    QueueClosed,

    #[error("Search for '{query}' failed: {source}")]
    Search { query: String, source: BackendError },

    #[error("{kind} action failed: {source}")]
    Action {
        kind: &'static str,
        source: BackendError,
    },

    #[error(transparent)]
    Host(#[from] HostError),
}
