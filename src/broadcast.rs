//! Result broadcast
//!
//! When running embedded in another process, the final verdict (or error)
//! is sent one-way to the embedder over a Unix socket.
//! Protocol: a single newline-terminated JSON message.

use crate::error::{AddrError, AddrResult};
use crate::oracle::VerificationResult;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable naming the embedder's socket
pub const NOTIFY_SOCKET_ENV: &str = "ADDRESSMATCH_NOTIFY_SOCKET";

/// Message sent to the embedding context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BroadcastMessage {
    Result(VerificationResult),
    Error { error: String },
}

impl From<&AddrResult<VerificationResult>> for BroadcastMessage {
    fn from(outcome: &AddrResult<VerificationResult>) -> Self {
        match outcome {
            Ok(result) => BroadcastMessage::Result(result.clone()),
            Err(e) => BroadcastMessage::Error {
                error: e.to_string(),
            },
        }
    }
}

/// One-way sender to the embedding context
#[derive(Debug, Clone)]
pub struct Broadcaster {
    socket_path: PathBuf,
}

impl Broadcaster {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
        }
    }

    /// Broadcaster for the embedding context, if there is one.
    ///
    /// An explicit path wins over the environment.
    pub fn detect(explicit: Option<&Path>) -> Option<Self> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(NOTIFY_SOCKET_ENV).map(PathBuf::from))
            .filter(|p| !p.as_os_str().is_empty())
            .map(Self::new)
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Send a message; nothing is read back
    pub fn send(&self, message: &BroadcastMessage) -> AddrResult<()> {
        let mut stream = UnixStream::connect(&self.socket_path).map_err(|e| {
            AddrError::Broadcast(format!("connect {:?}: {}", self.socket_path, e))
        })?;
        stream.set_write_timeout(Some(Duration::from_secs(5)))?;

        let line = serde_json::to_string(message)? + "\n";
        stream.write_all(line.as_bytes())?;

        debug!("📡 Broadcast sent to {:?}", self.socket_path);
        Ok(())
    }

    /// Send the outcome of a verification, logging rather than failing
    pub fn notify(&self, outcome: &AddrResult<VerificationResult>) {
        if let Err(e) = self.send(&BroadcastMessage::from(outcome)) {
            warn!("⚠️ Could not broadcast result: {}", e);
        }
    }
}
