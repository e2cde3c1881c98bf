//! Protocol module - JSON message types for the transcript feed
//!
//! Every message is one JSON object per line with a `type` tag and a
//! client-chosen `seq`. Replies echo the `seq` of the message they answer.

use serde::{Deserialize, Serialize};

/// Version reported in `welcome`.
pub const PROTOCOL_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

// ============== Client -> Board Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Handshake; the first client to say hello becomes the speaker.
    Hello {
        seq: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client: Option<ClientInfo>,
    },
    /// Replace the whole transcript.
    Transcript { seq: u64, text: String },
    /// Replace the transcript with nothing.
    Clear { seq: u64 },
}

impl ClientMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ClientMessage::Hello { seq, .. }
            | ClientMessage::Transcript { seq, .. }
            | ClientMessage::Clear { seq } => *seq,
        }
    }
}

// ============== Board -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidMessage,
    HandshakeRequired,
    NotSpeaker,
    StaleSeq,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidMessage => "invalid_message",
            ErrorCode::HandshakeRequired => "handshake_required",
            ErrorCode::NotSpeaker => "not_speaker",
            ErrorCode::StaleSeq => "stale_seq",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        seq: u64,
        protocol_version: String,
        client_id: u64,
        /// True when this client holds the speaker role.
        speaker: bool,
    },
    Ack {
        seq: u64,
    },
    Error {
        seq: u64,
        code: ErrorCode,
        message: String,
    },
}

impl ServerMessage {
    pub fn welcome(seq: u64, client_id: u64, speaker: bool) -> Self {
        ServerMessage::Welcome {
            seq,
            protocol_version: PROTOCOL_VERSION.to_string(),
            client_id,
            speaker,
        }
    }

    pub fn error(seq: u64, code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            seq,
            code,
            message: message.into(),
        }
    }
}

// ============== Parsing ==============

pub fn parse_client_message(line: &str) -> Result<ClientMessage, serde_json::Error> {
    serde_json::from_str(line)
}

/// Best-effort `seq` of a line that failed to parse, so the error reply can
/// still be correlated. Zero when absent.
pub fn extract_seq(line: &str) -> u64 {
    #[derive(Deserialize)]
    struct SeqOnly {
        seq: Option<u64>,
    }
    serde_json::from_str::<SeqOnly>(line)
        .ok()
        .and_then(|s| s.seq)
        .unwrap_or(0)
}

/// Serialize a message into `buf` as one newline-terminated line.
pub fn encode_line_into<T: Serialize>(msg: &T, buf: &mut Vec<u8>) -> Result<(), serde_json::Error> {
    buf.clear();
    serde_json::to_writer(&mut *buf, msg)?;
    buf.push(b'\n');
    Ok(())
}
