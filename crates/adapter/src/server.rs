//! TCP server for the transcript feed
//!
//! Accepts line-delimited JSON clients. One client at a time holds the
//! speaker role and may replace the transcript; everyone else is told why
//! their updates were refused.

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::protocol::{
    encode_line_into, extract_seq, parse_client_message, ClientMessage, ErrorCode, ServerMessage,
};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7878;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid feed address {addr:?}")]
    InvalidAddress { addr: String },
    #[error("failed to bind transcript feed on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to start feed runtime")]
    Runtime(#[source] io::Error),
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `SOLARI_FEED_HOST` and `SOLARI_FEED_PORT`; unparsable ports keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("SOLARI_FEED_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup("SOLARI_FEED_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { host, port }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, FeedError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| FeedError::InvalidAddress { addr })
    }
}

/// Check if the feed is disabled via `SOLARI_FEED_DISABLED`.
pub fn is_disabled() -> bool {
    std::env::var("SOLARI_FEED_DISABLED")
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// State shared by every connection.
#[derive(Debug)]
pub struct FeedState {
    speaker: Mutex<Option<u64>>,
    transcript: watch::Sender<String>,
    next_client_id: AtomicU64,
}

impl FeedState {
    pub fn new(transcript: watch::Sender<String>) -> Self {
        Self {
            speaker: Mutex::new(None),
            transcript,
            next_client_id: AtomicU64::new(1),
        }
    }

    pub async fn speaker(&self) -> Option<u64> {
        *self.speaker.lock().await
    }

    /// Take the role if nobody holds it. True when `client_id` holds it after the call.
    async fn claim_speaker(&self, client_id: u64) -> bool {
        let mut speaker = self.speaker.lock().await;
        match *speaker {
            None => {
                *speaker = Some(client_id);
                info!(client_id, "speaker role claimed");
                true
            }
            Some(current) => current == client_id,
        }
    }

    async fn release_speaker(&self, client_id: u64) {
        let mut speaker = self.speaker.lock().await;
        if *speaker == Some(client_id) {
            *speaker = None;
            info!(client_id, "speaker role released");
        }
    }

    async fn is_speaker(&self, client_id: u64) -> bool {
        *self.speaker.lock().await == Some(client_id)
    }

    fn publish(&self, text: String) {
        self.transcript.send_replace(text);
    }
}

/// Per-connection protocol state.
#[derive(Debug, Default)]
struct Session {
    handshaken: bool,
    last_seq: Option<u64>,
}

impl Session {
    /// Accept `seq` if it is newer than anything this client sent before.
    fn advance_seq(&mut self, seq: u64) -> bool {
        match self.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                self.last_seq = Some(seq);
                true
            }
        }
    }
}

pub async fn bind(config: &ServerConfig) -> Result<TcpListener, FeedError> {
    let addr = config.socket_addr()?;
    TcpListener::bind(addr)
        .await
        .map_err(|source| FeedError::Bind { addr, source })
}

/// Accept clients until the listener fails.
pub async fn serve(listener: TcpListener, state: Arc<FeedState>) -> io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "transcript feed listening");
    }
    loop {
        let (socket, addr) = listener.accept().await?;
        let client_id = state.next_client_id.fetch_add(1, Ordering::Relaxed);
        info!(client_id, %addr, "feed client connected");

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, &state).await {
                warn!(client_id, error = %e, "feed client error");
            }
            state.release_speaker(client_id).await;
            info!(client_id, "feed client disconnected");
        });
    }
}

async fn handle_client(socket: TcpStream, client_id: u64, state: &FeedState) -> io::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let mut session = Session::default();
    let mut line = String::new();
    let mut out = Vec::with_capacity(256);

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(());
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let reply = handle_line(trimmed, client_id, &mut session, state).await;
        if encode_line_into(&reply, &mut out).is_err() {
            continue;
        }
        writer.write_all(&out).await?;
        writer.flush().await?;
    }
}

async fn handle_line(
    line: &str,
    client_id: u64,
    session: &mut Session,
    state: &FeedState,
) -> ServerMessage {
    let msg = match parse_client_message(line) {
        Ok(msg) => msg,
        Err(e) => {
            debug!(client_id, error = %e, "unparsable feed message");
            return ServerMessage::error(extract_seq(line), ErrorCode::InvalidMessage, e.to_string());
        }
    };
    let seq = msg.seq();

    if let ClientMessage::Hello { client, .. } = &msg {
        if session.handshaken && !session.advance_seq(seq) {
            return ServerMessage::error(seq, ErrorCode::StaleSeq, "seq must increase");
        }
        session.handshaken = true;
        session.last_seq = Some(seq);
        let speaker = state.claim_speaker(client_id).await;
        info!(
            client_id,
            name = client.as_ref().map(|c| c.name.as_str()).unwrap_or("anonymous"),
            speaker,
            "feed client handshake"
        );
        return ServerMessage::welcome(seq, client_id, speaker);
    }

    if !session.handshaken {
        return ServerMessage::error(seq, ErrorCode::HandshakeRequired, "send hello first");
    }
    if !session.advance_seq(seq) {
        return ServerMessage::error(seq, ErrorCode::StaleSeq, "seq must increase");
    }
    if !state.is_speaker(client_id).await {
        return ServerMessage::error(seq, ErrorCode::NotSpeaker, "another client is speaking");
    }

    match msg {
        ClientMessage::Transcript { text, .. } => {
            debug!(client_id, seq, len = text.len(), "transcript update");
            state.publish(text);
        }
        ClientMessage::Clear { .. } => {
            debug!(client_id, seq, "transcript cleared");
            state.publish(String::new());
        }
        ClientMessage::Hello { .. } => {}
    }
    ServerMessage::Ack { seq }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> (FeedState, watch::Receiver<String>) {
        let (tx, rx) = watch::channel(String::new());
        (FeedState::new(tx), rx)
    }

    #[test]
    fn config_from_lookup() {
        let cfg = ServerConfig::from_lookup(|k| match k {
            "SOLARI_FEED_HOST" => Some("0.0.0.0".into()),
            "SOLARI_FEED_PORT" => Some("9000".into()),
            _ => None,
        });
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 9000);

        let fallback = ServerConfig::from_lookup(|k| {
            (k == "SOLARI_FEED_PORT").then(|| "not-a-port".to_string())
        });
        assert_eq!(fallback, ServerConfig::default());
    }

    #[test]
    fn invalid_host_is_reported() {
        let cfg = ServerConfig {
            host: "no such host".into(),
            port: 1,
        };
        assert!(matches!(
            cfg.socket_addr(),
            Err(FeedError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }

    #[tokio::test]
    async fn update_before_hello_requires_handshake() {
        let (state, _rx) = state();
        let mut s = Session::default();
        let reply = handle_line(r#"{"type":"transcript","seq":1,"text":"HI"}"#, 1, &mut s, &state)
            .await;
        assert!(matches!(
            reply,
            ServerMessage::Error {
                code: ErrorCode::HandshakeRequired,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn first_hello_becomes_speaker_and_publishes() {
        let (state, rx) = state();
        let mut a = Session::default();
        let mut b = Session::default();

        let welcome = handle_line(r#"{"type":"hello","seq":1}"#, 1, &mut a, &state).await;
        assert!(matches!(welcome, ServerMessage::Welcome { speaker: true, .. }));
        let welcome = handle_line(r#"{"type":"hello","seq":1}"#, 2, &mut b, &state).await;
        assert!(matches!(welcome, ServerMessage::Welcome { speaker: false, .. }));

        let ack = handle_line(r#"{"type":"transcript","seq":2,"text":"GATE 4"}"#, 1, &mut a, &state)
            .await;
        assert_eq!(ack, ServerMessage::Ack { seq: 2 });
        assert_eq!(*rx.borrow(), "GATE 4");

        let refused =
            handle_line(r#"{"type":"transcript","seq":2,"text":"NOPE"}"#, 2, &mut b, &state).await;
        assert!(matches!(
            refused,
            ServerMessage::Error {
                code: ErrorCode::NotSpeaker,
                ..
            }
        ));
        assert_eq!(*rx.borrow(), "GATE 4");
    }

    #[tokio::test]
    async fn stale_seq_is_rejected() {
        let (state, rx) = state();
        let mut s = Session::default();
        handle_line(r#"{"type":"hello","seq":5}"#, 1, &mut s, &state).await;
        let reply = handle_line(r#"{"type":"clear","seq":5}"#, 1, &mut s, &state).await;
        assert!(matches!(
            reply,
            ServerMessage::Error {
                code: ErrorCode::StaleSeq,
                seq: 5,
                ..
            }
        ));
        let reply = handle_line(r#"{"type":"transcript","seq":6,"text":"A"}"#, 1, &mut s, &state)
            .await;
        assert_eq!(reply, ServerMessage::Ack { seq: 6 });
        assert_eq!(*rx.borrow(), "A");
    }

    #[tokio::test]
    async fn released_role_can_be_reclaimed_by_hello() {
        let (state, _rx) = state();
        let mut a = Session::default();
        let mut b = Session::default();
        handle_line(r#"{"type":"hello","seq":1}"#, 1, &mut a, &state).await;
        handle_line(r#"{"type":"hello","seq":1}"#, 2, &mut b, &state).await;

        state.release_speaker(1).await;
        assert_eq!(state.speaker().await, None);

        let welcome = handle_line(r#"{"type":"hello","seq":2}"#, 2, &mut b, &state).await;
        assert!(matches!(welcome, ServerMessage::Welcome { speaker: true, .. }));
        assert_eq!(state.speaker().await, Some(2));
    }

    #[tokio::test]
    async fn garbage_gets_invalid_message() {
        let (state, _rx) = state();
        let mut s = Session::default();
        let reply = handle_line(r#"{"type":"dance","seq":3}"#, 1, &mut s, &state).await;
        assert!(matches!(
            reply,
            ServerMessage::Error {
                code: ErrorCode::InvalidMessage,
                seq: 3,
                ..
            }
        ));
    }
}
