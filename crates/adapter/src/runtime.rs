//! Feed runtime integration.
//!
//! Bridges the sync board loop with the async TCP server. The server owns a
//! `watch` sender; the board polls the receiver once per frame and never blocks.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::core::TextStreamSource;
use crate::server::{bind, is_disabled, serve, FeedError, FeedState, ServerConfig};

/// Running transcript feed.
pub struct TranscriptFeed {
    _rt: Runtime,
    rx: watch::Receiver<String>,
    state: Arc<FeedState>,
    addr: SocketAddr,
    running: bool,
    deliver_current: bool,
}

impl TranscriptFeed {
    /// Bind the listener and start serving in the background.
    pub fn listen(config: &ServerConfig) -> Result<Self, FeedError> {
        let requested = config.socket_addr()?;
        let rt = Runtime::new().map_err(FeedError::Runtime)?;
        let listener = rt.block_on(bind(config))?;
        let addr = listener.local_addr().map_err(|source| FeedError::Bind {
            addr: requested,
            source,
        })?;

        let (tx, rx) = watch::channel(String::new());
        let state = Arc::new(FeedState::new(tx));
        let server_state = Arc::clone(&state);
        rt.spawn(async move {
            if let Err(e) = serve(listener, server_state).await {
                warn!(error = %e, "transcript feed stopped");
            }
        });

        Ok(Self {
            _rt: rt,
            rx,
            state,
            addr,
            running: false,
            deliver_current: false,
        })
    }

    /// Start from environment variables.
    ///
    /// Returns `Ok(None)` if `SOLARI_FEED_DISABLED` is set.
    pub fn listen_from_env() -> Result<Option<Self>, FeedError> {
        if is_disabled() {
            info!("transcript feed disabled (SOLARI_FEED_DISABLED)");
            return Ok(None);
        }
        Self::listen(&ServerConfig::from_env()).map(Some)
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &Arc<FeedState> {
        &self.state
    }
}

impl TextStreamSource for TranscriptFeed {
    fn supported(&self) -> bool {
        true
    }

    /// The transcript already published is delivered on the next poll.
    fn start(&mut self) {
        self.running = true;
        self.deliver_current = true;
    }

    fn stop(&mut self) {
        self.running = false;
        self.deliver_current = false;
    }

    fn poll(&mut self) -> Option<String> {
        if !self.running {
            return None;
        }
        let changed = self.rx.has_changed().unwrap_or(false);
        if !(changed || std::mem::take(&mut self.deliver_current)) {
            return None;
        }
        self.deliver_current = false;
        Some(self.rx.borrow_and_update().clone())
    }
}
