use std::sync::Arc;

use crate::config::Config;
use crate::session::store::SessionStore;
use crate::suggestions::collaborators::{Clipboard, MemoryClipboard};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Copy target for rewrites, shared by all sessions. Default: MemoryClipboard,
    /// mirrored by the client from the copy response.
    pub clipboard: Arc<dyn Clipboard>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            sessions: SessionStore::new(config.recency_ttl, config.session_idle_ttl),
            clipboard: Arc::new(MemoryClipboard::default()),
            config,
        }
    }
}
