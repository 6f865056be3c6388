//! Destination for `log` output.
//!
//! `log` writes to an auxiliary stream next to the program's output:
//! - Native: stderr (default)
//! - Tests and embedders: a buffer
//! - Silent: discarded
//!
//! Enum dispatch, same as the rest of the evaluator's handlers.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Log handler that captures messages into a buffer.
#[derive(Default)]
pub struct BufferLogHandler {
    buffer: Mutex<Vec<u8>>,
}

impl BufferLogHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self, msg: &[u8]) {
        self.buffer.lock().extend_from_slice(msg);
    }

    /// Everything logged so far.
    pub fn get_output(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Log handler implementation using enum dispatch.
pub enum LogHandlerImpl {
    /// Writes to stderr (default).
    Stderr,
    /// Captures to a buffer.
    Buffer(BufferLogHandler),
    /// Discards everything.
    Silent,
}

impl LogHandlerImpl {
    /// Write `msg` as is; no newline is added.
    pub fn log(&self, msg: &[u8]) {
        match self {
            Self::Stderr => {
                let mut stderr = std::io::stderr().lock();
                let _ = stderr.write_all(msg);
                let _ = stderr.flush();
            }
            Self::Buffer(h) => h.log(msg),
            Self::Silent => {}
        }
    }

    /// Captured output. Empty for handlers that don't capture.
    pub fn get_output(&self) -> Vec<u8> {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stderr | Self::Silent => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Shared log handler that can be passed around.
pub type SharedLogHandler = Arc<LogHandlerImpl>;

/// Create the default stderr log handler.
pub fn stderr_handler() -> SharedLogHandler {
    Arc::new(LogHandlerImpl::Stderr)
}

/// Create a buffer log handler for capturing output.
pub fn buffer_handler() -> SharedLogHandler {
    Arc::new(LogHandlerImpl::Buffer(BufferLogHandler::new()))
}

/// Create a handler that discards everything.
pub fn silent_handler() -> SharedLogHandler {
    Arc::new(LogHandlerImpl::Silent)
}
