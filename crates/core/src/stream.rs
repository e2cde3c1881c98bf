//! External collaborators: text streams and viewports.
//!
//! The board never reaches for ambient global state. A text stream (speech
//! transcription, a network feed) and the viewport are handed in explicitly.

use std::collections::VecDeque;

/// A monotonically replaced transcript.
pub trait TextStreamSource {
    /// False when the capability is missing; the board then stays in
    /// cascade/manual mode.
    fn supported(&self) -> bool;

    fn start(&mut self);

    fn stop(&mut self);

    /// The latest transcript if it changed since the previous poll.
    fn poll(&mut self) -> Option<String>;
}

/// Provides the viewport size and reports resizes.
pub trait ViewportSource {
    fn size(&self) -> (f32, f32);

    /// New size if it changed since the previous poll.
    fn poll_resize(&mut self) -> Option<(f32, f32)>;
}

/// Stand-in for a missing stream capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTextStream;

impl TextStreamSource for NoTextStream {
    fn supported(&self) -> bool {
        false
    }

    fn start(&mut self) {}

    fn stop(&mut self) {}

    fn poll(&mut self) -> Option<String> {
        None
    }
}

/// Replays queued transcripts, one per poll, while started.
#[derive(Debug, Clone, Default)]
pub struct ScriptedStream {
    pending: VecDeque<String>,
    running: bool,
}

impl ScriptedStream {
    pub fn new<I, S>(updates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pending: updates.into_iter().map(Into::into).collect(),
            running: false,
        }
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.pending.push_back(text.into());
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl TextStreamSource for ScriptedStream {
    fn supported(&self) -> bool {
        true
    }

    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn poll(&mut self) -> Option<String> {
        if !self.running {
            return None;
        }
        self.pending.pop_front()
    }
}

/// Fixed-size viewport; `resize` queues a change for the next poll.
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport {
    size: (f32, f32),
    changed: bool,
}

impl FixedViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: (width, height),
            changed: false,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if self.size != (width, height) {
            self.size = (width, height);
            self.changed = true;
        }
    }
}

impl ViewportSource for FixedViewport {
    fn size(&self) -> (f32, f32) {
        self.size
    }

    fn poll_resize(&mut self) -> Option<(f32, f32)> {
        if std::mem::take(&mut self.changed) {
            Some(self.size)
        } else {
            None
        }
    }
}
