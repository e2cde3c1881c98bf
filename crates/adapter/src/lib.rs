//! Adapter module - live transcript feed over a TCP socket
//!
//! This module lets an external speech-to-text process (or anything else that
//! produces text) drive the board's live-stream mode.
//!
//! # Protocol Overview
//!
//! The feed implements a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: Client connects to the socket (default: 127.0.0.1:7878)
//! 2. **Handshake**: Client sends `hello`, server responds with `welcome`
//! 3. **Speaker Assignment**: First client to hello becomes the speaker
//! 4. **Publishing**: The speaker sends `transcript` (full replacement) or `clear`
//!
//! Every accepted update is answered with `ack`; refused ones with `error`
//! carrying one of `invalid_message`, `handshake_required`, `not_speaker`,
//! `stale_seq`. The speaker role is released on disconnect.
//!
//! # Environment Variables
//!
//! - `SOLARI_FEED_HOST`: Bind address (default: "127.0.0.1")
//! - `SOLARI_FEED_PORT`: Port number (default: 7878)
//! - `SOLARI_FEED_DISABLED`: Set to "1" or "true" to disable the feed entirely
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"client":{"name":"whisper","version":"1.0"}}
//! Server -> Client: {"type":"welcome","seq":1,"protocol_version":"1.0.0","client_id":1,"speaker":true}
//! Client -> Server: {"type":"transcript","seq":2,"text":"NOW BOARDING"}
//! Server -> Client: {"type":"ack","seq":2}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"hello","seq":1}
//! {"type":"transcript","seq":2,"text":"HELLO WORLD"}
//! ```

pub mod protocol;
pub mod runtime;
pub mod server;

pub use solari_core as core;
pub use solari_types as types;

pub use protocol::{
    encode_line_into, extract_seq, parse_client_message, ClientInfo, ClientMessage, ErrorCode,
    ServerMessage, PROTOCOL_VERSION,
};
pub use runtime::TranscriptFeed;
pub use server::{
    bind, is_disabled, serve, FeedError, FeedState, ServerConfig, DEFAULT_HOST, DEFAULT_PORT,
};
